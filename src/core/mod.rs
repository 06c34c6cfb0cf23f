pub mod catalog;
pub mod facade;
pub mod hooks;
pub mod links;

pub use crate::domain::model::{
    AcademyProduct, AcademyProductKind, ServiceCategory, ServiceItem, Testimonial,
    TestimonialRole, UnitConfig,
};
pub use crate::domain::ports::ContentSource;
pub use crate::utils::error::Result;
