//! Domain types and models
//!
//! Shapes mirror the backend's JSON (camelCase keys, upper-case enum
//! strings). The backend owns the full model; these types only carry what
//! the client reads or sends.

pub mod booking;
pub mod dashboard;
pub mod dealership;
pub mod enquiry;
pub mod export;
pub mod pagination;
pub mod quotation;
pub mod remark;
pub mod session;
pub mod stock;
pub mod user;

pub use booking::{
    AssignBookingRequest, Booking, BookingFilters, BookingStatus, CreateBookingRequest, ImportJob,
    ImportPreview, ImportRowError, ImportStatus, UpdateBookingRequest, UpdateBookingStatusRequest,
};
pub use dashboard::DashboardStats;
pub use dealership::{CatalogEntry, CatalogVariant, CreateDealershipRequest, Dealership};
pub use enquiry::{
    AssignEnquiryRequest, CreateEnquiryRequest, Enquiry, EnquiryCategory, EnquiryFilters,
    EnquiryStatus, UpdateEnquiryRequest,
};
pub use export::ExportFile;
pub use pagination::{Paginated, Pagination};
pub use quotation::{
    CreateQuotationRequest, Quotation, QuotationFilters, QuotationStatus, RejectQuotationRequest,
    UpdateQuotationRequest,
};
pub use remark::{AddRemarkRequest, CancelRemarkRequest, Remark, RemarkAuthor, RemarkType};
pub use session::{Role, Session, SessionRecord, SessionUser};
pub use stock::{CreateStockRequest, StockFilters, StockItem, StockStatus, UpdateStockRequest};
pub use user::{CreateUserRequest, UpdateUserRequest, UserProfile, UserRef};
