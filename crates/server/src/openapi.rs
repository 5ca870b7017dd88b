use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(utoipa::ToSchema)]
pub struct StoreDoc {
    pub id: i32,
    pub name: String,
    pub address: String,
    /// time of day, e.g. "08:00:00"
    pub opening_time: String,
    pub closing_time: String,
    pub friendliness_level: f32,
}

#[derive(utoipa::ToSchema)]
pub struct StoreInputDoc {
    pub name: String,
    pub address: String,
    pub opening_time: String,
    pub closing_time: String,
    pub friendliness_level: f32,
}

#[derive(utoipa::ToSchema)]
#[allow(non_snake_case)]
pub struct StorePageDoc {
    pub TotalItems: u64,
    pub TotalPages: u64,
    pub Items: Vec<StoreDoc>,
}

#[derive(utoipa::ToSchema)]
#[allow(non_snake_case)]
pub struct SupplierContactDoc {
    pub Name: String,
    pub PhoneNumber: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::stores::list,
        crate::routes::stores::get,
        crate::routes::stores::create,
        crate::routes::stores::update,
        crate::routes::stores::delete,
        crate::routes::stores::top_suppliers,
    ),
    components(
        schemas(
            HealthResponse,
            StoreDoc,
            StoreInputDoc,
            StorePageDoc,
            SupplierContactDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "stores")
    )
)]
pub struct ApiDoc;
