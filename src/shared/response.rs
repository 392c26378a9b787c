use serde::Serialize;
use utoipa::ToSchema;

/// JSON:API top-level document
#[derive(Serialize, ToSchema)]
pub struct JsonApiResponse<T> {
    pub data: T,
}

impl<T> JsonApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// JSON:API resource object
#[derive(Serialize, ToSchema)]
pub struct JsonApiResource<T> {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: T,
}

impl<T> JsonApiResource<T> {
    pub fn new(resource_type: &str, id: String, attributes: T) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            id,
            attributes,
        }
    }
}
