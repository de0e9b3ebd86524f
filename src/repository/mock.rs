use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, InquiryReader, InquiryWriter, OrderReader, OrderWriter,
    ProductReader, ProductWriter, ReportReader, ReviewReader, ReviewWriter, UserReader,
    UserWriter,
};
use crate::domain::{
    category::{Category, NewCategory, UpdateCategory},
    inquiry::{Inquiry, NewInquiry},
    order::{NewOrder, Order, OrderListQuery, OrderStatus},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    report::{CategoryShare, MonthlySales, StoreTotals, TopProduct},
    review::{NewReview, Review, ReviewListQuery},
    user::{NewUser, UpdateUser, User, UserListQuery},
};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
        fn get_users_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn get_products_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn place_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(&self, order_id: i32, status: OrderStatus) -> RepositoryResult<Order>;
    }
}

mock! {
    pub InquiryReader {}

    impl InquiryReader for InquiryReader {
        fn list_inquiries(&self, pagination: Pagination) -> RepositoryResult<(usize, Vec<Inquiry>)>;
    }
}

mock! {
    pub InquiryWriter {}

    impl InquiryWriter for InquiryWriter {
        fn create_inquiry(&self, new_inquiry: &NewInquiry) -> RepositoryResult<Inquiry>;
    }
}

mock! {
    pub ReviewReader {}

    impl ReviewReader for ReviewReader {
        fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<(usize, Vec<Review>)>;
    }
}

mock! {
    pub ReviewWriter {}

    impl ReviewWriter for ReviewWriter {
        fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
        fn approve_review(&self, review_id: i32) -> RepositoryResult<Review>;
        fn delete_review(&self, review_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ReportReader {}

    impl ReportReader for ReportReader {
        fn store_totals(&self) -> RepositoryResult<StoreTotals>;
        fn top_products(&self, limit: i64) -> RepositoryResult<Vec<TopProduct>>;
        fn monthly_sales(&self) -> RepositoryResult<Vec<MonthlySales>>;
        fn category_distribution(&self) -> RepositoryResult<Vec<CategoryShare>>;
    }
}

// Implements every repository trait, for services bounded by several of them.
mock! {
    pub Store {}

    impl UserReader for Store {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
        fn get_users_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl UserWriter for Store {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    }

    impl CategoryReader for Store {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }

    impl CategoryWriter for Store {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    }

    impl ProductReader for Store {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn get_products_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl ProductWriter for Store {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }

    impl OrderReader for Store {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }

    impl OrderWriter for Store {
        fn place_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(&self, order_id: i32, status: OrderStatus) -> RepositoryResult<Order>;
    }

    impl InquiryReader for Store {
        fn list_inquiries(&self, pagination: Pagination) -> RepositoryResult<(usize, Vec<Inquiry>)>;
    }

    impl InquiryWriter for Store {
        fn create_inquiry(&self, new_inquiry: &NewInquiry) -> RepositoryResult<Inquiry>;
    }

    impl ReviewReader for Store {
        fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<(usize, Vec<Review>)>;
    }

    impl ReviewWriter for Store {
        fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
        fn approve_review(&self, review_id: i32) -> RepositoryResult<Review>;
        fn delete_review(&self, review_id: i32) -> RepositoryResult<()>;
    }

    impl ReportReader for Store {
        fn store_totals(&self) -> RepositoryResult<StoreTotals>;
        fn top_products(&self, limit: i64) -> RepositoryResult<Vec<TopProduct>>;
        fn monthly_sales(&self) -> RepositoryResult<Vec<MonthlySales>>;
        fn category_distribution(&self) -> RepositoryResult<Vec<CategoryShare>>;
    }
}
