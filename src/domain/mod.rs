pub mod auth;
pub mod cart;
pub mod category;
pub mod inquiry;
pub mod order;
pub mod product;
pub mod recently_viewed;
pub mod report;
pub mod review;
pub mod user;
