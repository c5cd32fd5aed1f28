//! Integration tests for the asphalt estimator.
//!
//! This test suite covers:
//! - Asphalt quantities and pricing
//! - Crew labor (legacy block and roles, penalty rules)
//! - Excavation, disposal and imported materials
//! - Traffic control, depreciation and consumables
//! - The quote pipeline
//! - Error cases
//! - Properties that hold for any input

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use asphalt_estimator::api::{AppState, EstimateRequest, create_router};
use asphalt_estimator::calculation::{estimate, sum_sections};
use asphalt_estimator::config::{ConfigLoader, EstimatorConfig};
use asphalt_estimator::error::EngineError;
use asphalt_estimator::models::{
    AsphaltLayer, DisposalType, EquipmentUnits, ExcavationItem, LaborModel, LaborRole,
    LegacyLabor, Oncosts, PenaltyFlags, ProjectInput, ProjectSettings,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/standard").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_estimate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/estimate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn assert_decimal(actual: &Value, expected: &str) {
    let actual = actual
        .as_str()
        .unwrap_or_else(|| panic!("Expected a decimal string, got {}", actual));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

fn asphalt_request() -> Value {
    json!({
        "asphalt": {"area": 100, "depth": 50, "density": 2400, "costPerTonne": 200}
    })
}

// =============================================================================
// Asphalt
// =============================================================================

#[tokio::test]
async fn test_asphalt_quantity_100m2_50mm() {
    let (status, result) = post_estimate(create_router_for_test(), asphalt_request()).await;

    assert_eq!(status, StatusCode::OK);

    let quantity = &result["materialCosts"]["asphalt"]["quantity"];
    assert_decimal(&quantity["compactedVolume"], "5");
    assert_decimal(&quantity["looseVolume"], "6.25");
    assert_decimal(&quantity["weight"], "15");
    assert_decimal(&result["materialCosts"]["asphalt"]["cost"], "3000");
    assert_decimal(&result["totalArea"], "100");
}

#[tokio::test]
async fn test_asphalt_density_defaults_when_absent() {
    let request = json!({
        "asphalt": {"area": 100, "depth": 50, "costPerTonne": 200}
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["materialCosts"]["asphalt"]["quantity"]["weight"], "15");
}

#[tokio::test]
async fn test_numeric_strings_are_coerced() {
    let request = json!({
        "asphalt": {"area": "100 m2", "depth": "50", "density": "2400", "costPerTonne": "abc"}
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["materialCosts"]["asphalt"]["quantity"]["weight"], "15");
    assert_decimal(&result["materialCosts"]["asphalt"]["cost"], "0");
}

// =============================================================================
// Labor
// =============================================================================

#[tokio::test]
async fn test_legacy_saturday_crew_with_oncosts() {
    let request = json!({
        "laborLegacy": {
            "workers": 2,
            "hoursPerWorker": 8,
            "jobDurationDays": 1,
            "hourlyRate": 30,
            "superannuationPct": 11,
            "workersCompPct": 2,
            "saturday": true
        }
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);

    let labor = &result["laborCost"];
    assert_eq!(labor["source"], "legacy");
    assert_eq!(labor["lines"][0]["rule"], "saturday");
    // 2 × 8 × 1 × 30 × 1.5 × 1.13
    assert_decimal(&labor["totalCost"], "813.6");
    assert_decimal(&labor["totalHours"], "16");
}

#[tokio::test]
async fn test_roles_replace_legacy_crew() {
    let request = json!({
        "laborLegacy": {"workers": 10, "hoursPerWorker": 8, "jobDurationDays": 1, "hourlyRate": 99},
        "laborRoles": [
            {"type": "Operator", "workers": 1, "hoursPerDay": 7.5, "days": 1, "rate": 40},
            {"type": "Raker", "workers": 2, "hoursPerDay": 8, "days": 1, "rate": 30, "sunday": true}
        ]
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);

    let labor = &result["laborCost"];
    assert_eq!(labor["source"], "roles");
    assert_eq!(labor["lines"].as_array().unwrap().len(), 2);
    assert_eq!(labor["lines"][1]["rule"], "sunday");
    assert_eq!(labor["lines"][0]["rule"], "ordinary");
    // 7.5 × 40 + 2 × 8 × 30 × 2.0
    assert_decimal(&labor["totalCost"], "1260");
}

#[tokio::test]
async fn test_other_labor_fixed_with_gst() {
    let request = json!({
        "otherLaborItems": [
            {"type": "Line marking", "pricingMethod": "fixed", "fixedAmount": 500, "addGst": true},
            {"type": "Supervisor", "pricingMethod": "hourly", "hours": 4, "costPerHour": 60}
        ]
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["otherLaborCost"]["total"], "790");
}

// =============================================================================
// Excavation and imports
// =============================================================================

#[tokio::test]
async fn test_clean_fill_disposal_10_tonnes() {
    let request = json!({
        "excavationItems": [
            {"description": "Spoil", "material": "Clean Fill", "volume": 10, "density": 1000,
             "disposal": "Clean Fill", "tipFee": 150}
        ]
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);

    let excavation = &result["excavationCosts"];
    assert_decimal(&excavation["perItem"][0]["quantity"]["weight"], "10");
    assert_decimal(&excavation["disposalTotal"], "1500");
    assert_decimal(&excavation["disposalTotals"]["Clean Fill"], "1500");
    assert_decimal(&excavation["sectionTotal"], "1500");
}

#[tokio::test]
async fn test_reuse_disposal_is_free() {
    let request = json!({
        "excavationItems": [
            {"material": "Clean Fill", "volume": 10, "density": 1000,
             "disposal": "reuse", "tipFee": 150}
        ]
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["excavationCosts"]["disposalTotal"], "0");
    assert_decimal(&result["excavationCosts"]["perItem"][0]["disposalCost"], "0");
}

#[tokio::test]
async fn test_machine_hours_and_imports_in_section_total() {
    let request = json!({
        "excavationEquipment": [{"id": "ex1", "type": "5t Excavator", "hourlyRate": 95}],
        "excavationItems": [
            {
                "material": "Clay",
                "volume": 4,
                "disposal": "Reuse",
                "machineHours": 6,
                "equipmentId": "ex1"
            }
        ],
        "importMaterials": [
            {"material": "Road Base", "volume": 6, "costPerTonne": 40}
        ]
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);

    let excavation = &result["excavationCosts"];
    assert_decimal(&excavation["equipmentTotals"]["5t Excavator"], "570");
    // 6 m³ × 2.2 t/m³ × $40
    assert_decimal(&excavation["importMaterialTotal"], "528");
    assert_decimal(&excavation["sectionTotal"], "1098");
}

#[tokio::test]
async fn test_missing_quantity_reported_not_failed() {
    let request = json!({
        "excavationItems": [
            {"description": "Kerb", "material": "Concrete", "tipFee": 80},
            {"material": "Clean Fill", "volume": 10, "density": 1000, "tipFee": 150}
        ]
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);

    let issues = result["validationIssues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["kind"], "MISSING_REQUIRED_QUANTITY");
    assert_eq!(issues[0]["section"], "excavationItems");
    assert_eq!(issues[0]["index"], 0);
    assert_decimal(&result["excavationCosts"]["sectionTotal"], "1500");
}

#[tokio::test]
async fn test_unknown_material_warns() {
    let request = json!({
        "importMaterials": [{"material": "Moon Dust", "volume": 1, "costPerTonne": 10}]
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);

    let warnings = result["auditTrace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "UNKNOWN_MATERIAL"));
    // 1 m³ at the default 1.8 t/m³
    assert_decimal(&result["excavationCosts"]["importMaterialTotal"], "18");
}

// =============================================================================
// Traffic control, depreciation, consumables
// =============================================================================

#[tokio::test]
async fn test_traffic_control_high_complexity_in_rain() {
    let request = json!({
        "trafficControl": {
            "required": true,
            "hours": 8,
            "workers": 2,
            "hourlyRate": 50,
            "complexity": "high",
            "equipmentList": ["Signage", "Cones"],
            "permitList": ["Council Permit"],
            "weatherList": ["Light Rain"]
        }
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    // (1200 + 250 + 250) × 1.1
    assert_decimal(&result["trafficControlCost"]["total"], "1870");
}

#[tokio::test]
async fn test_depreciation_follows_labor_hours() {
    let request = json!({
        "laborLegacy": {"workers": 1, "hoursPerWorker": 10, "jobDurationDays": 1, "hourlyRate": 30},
        "equipmentUnits": {"skidsteer": 1}
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);

    let depreciation = &result["equipmentDepreciation"];
    assert_decimal(&depreciation["totalJobDays"], "1");
    let total = decimal(depreciation["total"].as_str().unwrap());
    assert_eq!(total.round_dp(2), decimal("11.54"));
}

#[tokio::test]
async fn test_consumables_and_emulsion() {
    let request = json!({
        "asphalt": {"area": 200},
        "emulsion": {"type": "CRS", "coveragePerM2": 0.3, "costPerLitre": 1.5},
        "consumables": {
            "paint": {"quantity": 2, "unitCost": 45},
            "diesel": {"quantity": 100, "unitCost": 2.1}
        }
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["materialCosts"]["emulsion"]["cost"], "94.5");
    assert_decimal(&result["consumablesCost"]["total"], "300");
    assert_decimal(&result["totalCosts"], "394.5");
}

// =============================================================================
// Quote pipeline
// =============================================================================

#[tokio::test]
async fn test_quote_margin_discount_tax() {
    let request = json!({
        "otherLaborItems": [{"type": "Crew", "pricingMethod": "fixed", "fixedAmount": 1000}],
        "project": {"profitMarginPct": 20, "discountPct": 10, "taxRatePct": 10}
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["totalCosts"], "1000");
    assert_decimal(&result["quoteBeforeDiscount"], "1250");
    assert_decimal(&result["discountAmount"], "125");
    assert_decimal(&result["subtotalAfterDiscount"], "1125");
    assert_decimal(&result["gstAmount"], "112.5");
    assert_decimal(&result["totalWithTax"], "1237.5");
    assert_decimal(&result["profit"], "125");
}

#[tokio::test]
async fn test_quote_blank_tax_rate_uses_default_gst() {
    let mut request = asphalt_request();
    request["project"] = json!({"taxRatePct": ""});
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["gstAmount"], "300");
    assert_decimal(&result["totalWithTax"], "3300");

    let mut request = asphalt_request();
    request["project"] = json!({"taxRatePct": 0});
    let (_, result) = post_estimate(create_router_for_test(), request).await;
    assert_decimal(&result["totalWithTax"], "3000");
}

#[tokio::test]
async fn test_quote_valid_until_from_issue_date() {
    let request = json!({
        "project": {"issueDate": "2025-03-01", "validForDays": 14}
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["validUntil"], "2025-03-15");
}

#[tokio::test]
async fn test_per_square_meter_null_without_area() {
    let (status, result) = post_estimate(create_router_for_test(), json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["perSquareMeter"]["cost"].is_null());
    assert!(result["perSquareMeter"]["quote"].is_null());
    assert!(result["perSquareMeter"]["profit"].is_null());
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_error_margin_of_100_percent() {
    let mut request = asphalt_request();
    request["project"] = json!({"profitMarginPct": 100});
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_MARGIN");
}

#[tokio::test]
async fn test_error_malformed_json() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/estimate")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"asphalt\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_huge_dimensions_are_out_of_range() {
    let request = json!({
        "asphalt": {"area": "1e20", "depth": "1e20", "costPerTonne": 200}
    });
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALUE_OUT_OF_RANGE");
    assert_eq!(result["message"], "Value out of range computing compacted volume");
}

#[tokio::test]
async fn test_error_huge_discount_is_out_of_range() {
    let mut request = asphalt_request();
    request["project"] = json!({"discountPct": "1e28"});
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALUE_OUT_OF_RANGE");
    assert_eq!(result["message"], "Value out of range computing discount");
}

#[tokio::test]
async fn test_error_array_where_number_expected() {
    let request = json!({"laborRoles": [{"type": "Raker", "workers": [2]}]});
    let (status, result) = post_estimate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Audit trace
// =============================================================================

#[tokio::test]
async fn test_audit_trace_contains_steps() {
    let (status, result) = post_estimate(create_router_for_test(), asphalt_request()).await;

    assert_eq!(status, StatusCode::OK);

    let steps = result["auditTrace"]["steps"].as_array().unwrap();
    assert_eq!(steps[0]["ruleId"], "asphalt_quantity");

    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step["stepNumber"], index + 1);
        assert!(step["ruleName"].is_string());
        assert!(step["reasoning"].is_string());
    }
}

#[tokio::test]
async fn test_request_type_round_trips_through_http() {
    let request: EstimateRequest = serde_json::from_value(json!({
        "asphalt": {"area": 100, "depth": 50, "costPerTonne": 200},
        "project": {"profitMarginPct": 25}
    }))
    .unwrap();
    let body = serde_json::to_value(&request).unwrap();
    let (status, result) = post_estimate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["quoteBeforeDiscount"], "4000");
}

// =============================================================================
// Properties
// =============================================================================

fn money() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn positive_money() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn small_count() -> impl Strategy<Value = Decimal> {
    (0u32..20).prop_map(Decimal::from)
}

fn paving_job(area: Decimal, cost_per_tonne: Decimal, other: Decimal) -> ProjectInput {
    ProjectInput {
        asphalt: AsphaltLayer {
            area,
            depth: Decimal::from(40),
            density: Decimal::ZERO,
            cost_per_tonne,
        },
        labor: LaborModel::Legacy(LegacyLabor {
            workers: Decimal::from(3),
            hours_per_worker: Decimal::from(9),
            job_duration_days: Decimal::ONE,
            hourly_rate: other,
            flags: PenaltyFlags::default(),
        }),
        oncosts: Oncosts {
            superannuation_pct: Decimal::from(11),
            workers_comp_pct: Decimal::from(2),
            other_costs_pct: Decimal::ZERO,
        },
        ..ProjectInput::default()
    }
}

proptest! {
    #[test]
    fn prop_estimate_is_idempotent(area in money(), price in money(), rate in money()) {
        let config = EstimatorConfig::standard();
        let input = paving_job(area, price, rate);
        let first = estimate(&input, &config).unwrap();
        let second = estimate(&input, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_total_costs_is_sum_of_sections(area in money(), price in money(), rate in money()) {
        let job = paving_job(area, price, rate);
        let result = estimate(&job, &EstimatorConfig::standard()).unwrap();
        prop_assert_eq!(Some(result.total_costs), sum_sections(&result));
    }

    #[test]
    fn prop_reuse_never_costs_disposal(
        volume in 1u32..500,
        tip_fee in money(),
        dirty in any::<bool>(),
    ) {
        let input = ProjectInput {
            excavation_items: vec![ExcavationItem {
                material: "Clean Fill".to_string(),
                volume: Some(Decimal::from(volume)),
                disposal: DisposalType::Reuse,
                is_dirty: dirty,
                tip_fee,
                ..ExcavationItem::default()
            }],
            ..ProjectInput::default()
        };
        let result = estimate(&input, &EstimatorConfig::standard()).unwrap();
        prop_assert_eq!(result.excavation_costs.disposal_total, Decimal::ZERO);
        prop_assert_eq!(result.excavation_costs.per_item[0].disposal_cost, Decimal::ZERO);
    }

    #[test]
    fn prop_roles_ignore_legacy_block(
        legacy_workers in small_count(),
        legacy_hours in small_count(),
        legacy_rate in money(),
        role_workers in 1u32..20,
        role_rate in positive_money(),
        rollers in small_count(),
    ) {
        let role = LaborRole {
            role_type: "Raker".to_string(),
            workers: Decimal::from(role_workers),
            hours_per_day: Decimal::from(8),
            days: Decimal::ONE,
            rate: role_rate,
            flags: PenaltyFlags::default(),
        };
        let equipment_units = EquipmentUnits {
            two_t_roller: rollers,
            ..EquipmentUnits::default()
        };
        let with_legacy = ProjectInput {
            labor: LaborModel::from_sections(
                LegacyLabor {
                    workers: legacy_workers,
                    hours_per_worker: legacy_hours,
                    job_duration_days: Decimal::ONE,
                    hourly_rate: legacy_rate,
                    flags: PenaltyFlags {
                        saturday: true,
                        ..PenaltyFlags::default()
                    },
                },
                vec![role.clone()],
            ),
            equipment_units: equipment_units.clone(),
            ..ProjectInput::default()
        };
        let without_legacy = ProjectInput {
            labor: LaborModel::from_sections(LegacyLabor::default(), vec![role]),
            equipment_units,
            ..ProjectInput::default()
        };
        let config = EstimatorConfig::standard();
        let a = estimate(&with_legacy, &config).unwrap();
        let b = estimate(&without_legacy, &config).unwrap();
        prop_assert!(a.total_costs > Decimal::ZERO);
        prop_assert_eq!(a.total_costs, b.total_costs);
        prop_assert_eq!(&a.labor_cost, &b.labor_cost);
        prop_assert_eq!(&a.equipment_depreciation, &b.equipment_depreciation);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_higher_discount_lowers_total(
        price in positive_money(),
        margin in 0u32..95,
        low in 0u32..100,
        step in 1u32..=100,
    ) {
        let high = (low + step).min(100);
        let config = EstimatorConfig::standard();
        let priced = |discount: u32| {
            let input = ProjectInput {
                project: ProjectSettings {
                    profit_margin_pct: Decimal::from(margin),
                    discount_pct: Decimal::from(discount),
                    ..ProjectSettings::default()
                },
                ..paving_job(Decimal::from(100), price, Decimal::from(30))
            };
            estimate(&input, &config).unwrap()
        };
        let small = priced(low);
        let large = priced(high);
        prop_assert!(small.total_costs > Decimal::ZERO);
        prop_assert!(large.total_with_tax < small.total_with_tax);
        prop_assert!(large.subtotal_after_discount < small.subtotal_after_discount);
        prop_assert!(large.subtotal_after_discount >= Decimal::ZERO);
        prop_assert!(large.total_with_tax >= large.subtotal_after_discount);
    }

    #[test]
    fn prop_higher_tax_raises_total(
        price in positive_money(),
        low in 0u32..100,
        step in 1u32..=100,
    ) {
        let high = (low + step).min(100);
        let config = EstimatorConfig::standard();
        let priced = |tax: u32| {
            let input = ProjectInput {
                project: ProjectSettings {
                    tax_rate_pct: Decimal::from(tax),
                    ..ProjectSettings::default()
                },
                ..paving_job(Decimal::from(100), price, Decimal::from(30))
            };
            estimate(&input, &config).unwrap()
        };
        let lower = priced(low);
        let higher = priced(high);
        prop_assert!(lower.total_costs > Decimal::ZERO);
        prop_assert!(higher.total_with_tax > lower.total_with_tax);
    }

    #[test]
    fn prop_margin_boundary(margin in 0u32..300) {
        let input = ProjectInput {
            project: ProjectSettings {
                profit_margin_pct: Decimal::from(margin),
                ..ProjectSettings::default()
            },
            ..paving_job(Decimal::from(100), Decimal::from(200), Decimal::from(30))
        };
        let result = estimate(&input, &EstimatorConfig::standard());
        if margin >= 100 {
            let rejected = matches!(result, Err(EngineError::InvalidMargin { .. }));
            prop_assert!(rejected);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
