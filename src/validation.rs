// src/validation.rs
//
// Stateless input validation, run by the handlers before any service or
// storage access. Field names match the JSON wire names.
use crate::dtos::product::{CreateProductRequest, ListProductsParams, UpdateProductRequest};

pub const MAX_PRODUCT_NAME_LEN: usize = 255;
pub const MAX_AUTHOR_LEN: usize = 100;
pub const MAX_SEARCH_TERM_LEN: usize = 100;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn validate_create(request: &CreateProductRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if request.product_name.trim().is_empty() {
        errors.push(FieldError::new("productName", "Product name is required."));
    } else if request.product_name.chars().count() > MAX_PRODUCT_NAME_LEN {
        errors.push(FieldError::new(
            "productName",
            "Product name cannot exceed 255 characters.",
        ));
    }

    if request.created_by.trim().is_empty() {
        errors.push(FieldError::new("createdBy", "Created by is required."));
    } else if request.created_by.chars().count() > MAX_AUTHOR_LEN {
        errors.push(FieldError::new(
            "createdBy",
            "Created by cannot exceed 100 characters.",
        ));
    }

    errors
}

// Absent fields are not being set and produce no errors
pub fn validate_update(request: &UpdateProductRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(product_name) = &request.product_name {
        if product_name.chars().count() > MAX_PRODUCT_NAME_LEN {
            errors.push(FieldError::new(
                "productName",
                "Product name cannot exceed 255 characters.",
            ));
        }
    }

    if let Some(modified_by) = &request.modified_by {
        if modified_by.chars().count() > MAX_AUTHOR_LEN {
            errors.push(FieldError::new(
                "modifiedBy",
                "Modified by cannot exceed 100 characters.",
            ));
        }
    }

    errors
}

pub fn validate_list_params(params: &ListProductsParams) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if params.page_number < 1 {
        errors.push(FieldError::new(
            "pageNumber",
            "Page number must be greater than 0.",
        ));
    }

    if params.page_size < 1 || params.page_size > MAX_PAGE_SIZE {
        errors.push(FieldError::new(
            "pageSize",
            "Page size must be between 1 and 100.",
        ));
    }

    if let Some(search_term) = &params.search_term {
        if search_term.chars().count() > MAX_SEARCH_TERM_LEN {
            errors.push(FieldError::new(
                "searchTerm",
                "Search term cannot exceed 100 characters.",
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(product_name: &str, created_by: &str) -> CreateProductRequest {
        CreateProductRequest {
            product_name: product_name.to_string(),
            created_by: created_by.to_string(),
        }
    }

    #[test]
    fn create_passes_for_valid_input() {
        let errors = validate_create(&create_request("Valid Product Name", "John Doe"));
        assert!(errors.is_empty());
    }

    #[test]
    fn create_fails_when_product_name_is_empty() {
        let errors = validate_create(&create_request("", "John Doe"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "productName");
    }

    #[test]
    fn create_fails_when_product_name_exceeds_max_length() {
        let errors = validate_create(&create_request(&"A".repeat(256), "John Doe"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "productName");
    }

    #[test]
    fn create_accepts_product_name_at_max_length() {
        let errors = validate_create(&create_request(&"A".repeat(255), "John Doe"));
        assert!(errors.is_empty());
    }

    #[test]
    fn create_fails_when_created_by_is_missing_or_too_long() {
        let errors = validate_create(&create_request("Widget", ""));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "createdBy");

        let errors = validate_create(&create_request("Widget", &"B".repeat(101)));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "createdBy");
    }

    #[test]
    fn create_collects_every_failing_field() {
        let errors = validate_create(&create_request("", ""));
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["productName", "createdBy"]);
    }

    #[test]
    fn update_accepts_absent_fields() {
        let errors = validate_update(&UpdateProductRequest::default());
        assert!(errors.is_empty());
    }

    #[test]
    fn update_checks_only_present_fields() {
        let errors = validate_update(&UpdateProductRequest {
            product_name: Some("N".repeat(256)),
            modified_by: None,
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "productName");

        let errors = validate_update(&UpdateProductRequest {
            product_name: None,
            modified_by: Some("M".repeat(101)),
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "modifiedBy");
    }

    #[test]
    fn list_params_reject_out_of_range_pagination() {
        let errors = validate_list_params(&ListProductsParams {
            page_number: 0,
            page_size: 10,
            search_term: None,
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "pageNumber");

        for page_size in [0, 101] {
            let errors = validate_list_params(&ListProductsParams {
                page_number: 1,
                page_size,
                search_term: None,
            });
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "pageSize");
        }
    }

    #[test]
    fn list_params_reject_oversized_search_term() {
        let errors = validate_list_params(&ListProductsParams {
            page_number: 1,
            page_size: 100,
            search_term: Some("s".repeat(101)),
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "searchTerm");
    }

    #[test]
    fn list_params_accept_boundary_values() {
        let errors = validate_list_params(&ListProductsParams {
            page_number: 1,
            page_size: 100,
            search_term: Some("s".repeat(100)),
        });
        assert!(errors.is_empty());
    }
}
