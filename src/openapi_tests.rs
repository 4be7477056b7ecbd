#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components should be generated");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            other => panic!("{} should be an object schema, got {:?}", name, other.is_some()),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        let components = openapi.components.as_ref().unwrap();
        for name in [
            "ErrorResponse",
            "HealthResponse",
            "TimeseriesResponse",
            "StatisticsResponse",
            "ForecastResponse",
            "ImagesResponse",
            "CountStatistics",
            "DecorativeImage",
        ] {
            assert!(components.schemas.contains_key(name), "missing schema {}", name);
        }

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_health_response_schema_structure() {
        let properties = object_properties("HealthResponse");
        for field in ["status", "version", "database"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_statistics_schema_structure() {
        let properties = object_properties("CountStatistics");
        for field in ["total_days", "max_daily_count", "avg_daily_count"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_every_route_is_documented_as_get() {
        let openapi = ApiDoc::openapi();

        for path in [
            "/health",
            "/api/v1/counters/timeseries",
            "/api/v1/counters/statistics",
            "/api/v1/forecast",
            "/api/v1/images",
        ] {
            let item = openapi
                .paths
                .paths
                .get(path)
                .unwrap_or_else(|| panic!("{} is not documented", path));
            let operation = item
                .operations
                .get(&PathItemType::Get)
                .unwrap_or_else(|| panic!("{} has no GET", path));
            assert!(operation.responses.responses.contains_key("200"));
        }
    }

    #[test]
    fn test_forecast_documents_horizon_parameter() {
        let openapi = ApiDoc::openapi();
        let operation = openapi.paths.paths["/api/v1/forecast"]
            .operations
            .get(&PathItemType::Get)
            .unwrap();

        let parameters = operation.parameters.as_ref().unwrap();
        assert!(parameters.iter().any(|p| p.name == "horizon"));
    }

    #[test]
    fn test_error_responses_reference_schema_by_name() {
        let openapi_json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(!openapi_json.contains("common::TimeseriesResponse"));
        assert!(openapi_json.contains("#/components/schemas/ErrorResponse"));
    }
}
