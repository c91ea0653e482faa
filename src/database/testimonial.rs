use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::testimonial::{Testimonial, TestimonialRequest};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait TestimonialRepository: Send + Sync {
    async fn create_testimonial(&self, request: &TestimonialRequest) -> Result<Testimonial, AppError>;
    async fn list_approved_testimonials(&self) -> Result<Vec<Testimonial>, AppError>;
    async fn list_all_testimonials(&self) -> Result<Vec<Testimonial>, AppError>;
    async fn get_testimonial_by_id(&self, id: &Uuid) -> Result<Option<Testimonial>, AppError>;
    async fn approve_testimonial(&self, id: &Uuid) -> Result<Option<Testimonial>, AppError>;
    async fn set_testimonial_featured(&self, id: &Uuid, featured: bool) -> Result<Option<Testimonial>, AppError>;
    async fn delete_testimonial(&self, id: &Uuid) -> Result<bool, AppError>;
}

#[async_trait::async_trait]
impl TestimonialRepository for PostgresRepository {
    async fn create_testimonial(&self, request: &TestimonialRequest) -> Result<Testimonial, AppError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (author_name, author_role, company, email, content, rating)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, author_name, author_role, company, email, content, rating, is_approved, is_featured, created_at
            "#,
        )
        .bind(&request.author_name)
        .bind(&request.author_role)
        .bind(&request.company)
        .bind(&request.email)
        .bind(&request.content)
        .bind(request.rating)
        .fetch_one(&self.pool)
        .await?;

        Ok(testimonial)
    }

    async fn list_approved_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        let testimonials = sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT id, author_name, author_role, company, email, content, rating, is_approved, is_featured, created_at
            FROM testimonials
            WHERE is_approved
            ORDER BY is_featured DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(testimonials)
    }

    async fn list_all_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        let testimonials = sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT id, author_name, author_role, company, email, content, rating, is_approved, is_featured, created_at
            FROM testimonials
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(testimonials)
    }

    async fn get_testimonial_by_id(&self, id: &Uuid) -> Result<Option<Testimonial>, AppError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT id, author_name, author_role, company, email, content, rating, is_approved, is_featured, created_at
            FROM testimonials
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(testimonial)
    }

    async fn approve_testimonial(&self, id: &Uuid) -> Result<Option<Testimonial>, AppError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            r#"
            UPDATE testimonials
            SET is_approved = TRUE
            WHERE id = $1
            RETURNING id, author_name, author_role, company, email, content, rating, is_approved, is_featured, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(testimonial)
    }

    async fn set_testimonial_featured(&self, id: &Uuid, featured: bool) -> Result<Option<Testimonial>, AppError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            r#"
            UPDATE testimonials
            SET is_featured = $1
            WHERE id = $2
            RETURNING id, author_name, author_role, company, email, content, rating, is_approved, is_featured, created_at
            "#,
        )
        .bind(featured)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(testimonial)
    }

    async fn delete_testimonial(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
