pub mod code;
pub mod contact;
pub mod dispatch;
pub mod history;
pub mod link;
pub mod permit;
pub mod photo;
pub mod property;
pub mod service;
pub mod shared;
pub mod suite;
pub mod utility;
