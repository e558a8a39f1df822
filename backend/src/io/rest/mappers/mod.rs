//! Conversions between domain models and the shared wire DTOs.

pub mod account_mapper;
pub mod activity_mapper;
pub mod notification_mapper;
pub mod task_mapper;
