pub mod category;
pub mod inquiry;
pub mod order;
pub mod product;
pub mod report;
pub mod review;
pub mod user;
