use diesel::prelude::*;

use crate::{
    domain::inquiry::{Inquiry as DomainInquiry, NewInquiry as DomainNewInquiry},
    models::inquiry::{Inquiry as DbInquiry, NewInquiry as DbNewInquiry},
    pagination::Pagination,
    repository::errors::RepositoryResult,
    repository::{DieselRepository, InquiryReader, InquiryWriter},
};

impl InquiryReader for DieselRepository {
    fn list_inquiries(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<DomainInquiry>)> {
        use crate::schema::inquiries;

        let mut conn = self.conn()?;

        let total = inquiries::table.count().get_result::<i64>(&mut conn)? as usize;

        let rows = inquiries::table
            .order((inquiries::created_at.desc(), inquiries::id.desc()))
            .offset(pagination.offset())
            .limit(pagination.limit())
            .load::<DbInquiry>(&mut conn)?;

        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl InquiryWriter for DieselRepository {
    fn create_inquiry(&self, new_inquiry: &DomainNewInquiry) -> RepositoryResult<DomainInquiry> {
        use crate::schema::inquiries;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(inquiries::table)
            .values(&DbNewInquiry::from(new_inquiry))
            .get_result::<DbInquiry>(&mut conn)?;

        Ok(created.into())
    }
}
