use utoipa::OpenApi;

use crate::models::{Quality, Site, TrackedReleaseView};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kaori API",
        version = "1.0.0"
    ),
    tags(
        (name = "tracked", description = "Tracked release listing")
    ),
    components(schemas(TrackedReleaseView, Site, Quality))
)]
pub struct ApiDoc;
