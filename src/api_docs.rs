use utoipa::OpenApi;
use crate::controllers::sizing_controller;
use crate::models::equipment;
use crate::models::sizing;

#[derive(OpenApi)]
#[openapi(
    paths(
        sizing_controller::create_session,
        sizing_controller::set_location,
        sizing_controller::get_resource,
        sizing_controller::add_consumption,
        sizing_controller::list_consumption,
        sizing_controller::compute_sizing,
        sizing_controller::list_panels,
        sizing_controller::list_inverters
    ),
    components(
        schemas(
            equipment::PanelSpec,
            equipment::InverterSpec,
            sizing::Location,
            sizing::HspStats,
            sizing::Scenario,
            sizing::SizingResult,
            sizing::AreaLayout,
            sizing::LocationRequest,
            sizing::LocationResponse,
            sizing::ResourceResponse,
            sizing::ConsumptionRequest,
            sizing::ConsumptionResponse,
            sizing::SessionCreatedResponse
        )
    ),
    tags(
        (name = "pv-consulter", description = "PV Installation Sizing API")
    )
)]
pub struct ApiDoc;
