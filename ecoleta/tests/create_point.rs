use async_trait::async_trait;
use ecoleta::api::PointsApi;
use ecoleta::ecoleta_types::latlon;
use ecoleta::form::{execute, Effect, PointForm, Request, POINT_CREATED_NOTICE};
use ecoleta::location::LocationPicker;
use ecoleta::model::{CategoryItem, Locality, NewPoint, Region};
use ecoleta::navigation::{History, Route};
use ecoleta::EcoletaError;
use parking_lot::Mutex;
use serde_json::json;

#[derive(Default)]
struct FakeApi {
    created: Mutex<Vec<NewPoint>>,
    locality_requests: Mutex<Vec<String>>,
}

#[async_trait]
impl PointsApi for FakeApi {
    async fn categories(&self) -> Result<Vec<CategoryItem>, EcoletaError> {
        Ok(vec![CategoryItem {
            id: 1,
            title: "Lâmpadas".to_string(),
            image_url: "http://localhost:3333/uploads/lampadas.svg".to_string(),
        }])
    }

    async fn regions(&self) -> Result<Vec<Region>, EcoletaError> {
        Ok(vec![Region {
            id: 1,
            code: "SC".to_string(),
            name: "Santa Catarina".to_string(),
        }])
    }

    async fn localities(&self, region_code: &str) -> Result<Vec<Locality>, EcoletaError> {
        self.locality_requests.lock().push(region_code.to_string());
        match region_code {
            "SC" => Ok(vec![Locality {
                id: 1,
                name: "Criciúma".to_string(),
            }]),
            _ => Err(EcoletaError::Status(404)),
        }
    }

    async fn create_point(&self, point: &NewPoint) -> Result<(), EcoletaError> {
        self.created.lock().push(point.clone());
        Ok(())
    }
}

fn run(api: &FakeApi, form: &mut PointForm, request: Request) -> Vec<Effect> {
    let response = tokio_test::block_on(execute(api, request));
    form.apply(response)
}

#[test]
fn register_point() -> anyhow::Result<()> {
    let api = FakeApi::default();
    let mut form = PointForm::new();
    let mut picker = LocationPicker::new();
    let mut history = History::new(Route::Home);
    history.push(Route::CreatePoint);

    for request in form.mount() {
        run(&api, &mut form, request);
    }
    assert_eq!(form.categories()[0].title, "Lâmpadas");
    assert_eq!(form.regions()[0].label(), "Santa Catarina ( SC )");
    assert!(!form.locality_selector_enabled());

    let request = form.select_region("SC").expect("localities request");
    run(&api, &mut form, request);
    assert!(form.locality_selector_enabled());
    assert_eq!(form.localities()[0].name, "Criciúma");
    assert!(!form.can_submit());

    form.select_locality("Criciúma");
    picker.click(latlon!(-28.49, -49.03));
    form.toggle_category(1);
    assert!(form.can_submit());

    let request = form.submit(picker.position()).expect("submit request");
    let effects = run(&api, &mut form, request);

    let created = api.created.lock().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(
        serde_json::to_value(&created[0])?,
        json!({
            "name": "",
            "email": "",
            "whatsapp": "",
            "latitude": -28.49,
            "longitude": -49.03,
            "city": "Criciúma",
            "uf": "SC",
            "items": [1],
        })
    );

    assert_eq!(
        effects,
        vec![
            Effect::Notice(POINT_CREATED_NOTICE.to_string()),
            Effect::Navigate(Route::Home)
        ]
    );
    for effect in effects {
        if let Effect::Navigate(route) = effect {
            history.replace(route);
        }
    }
    assert_eq!(history.current(), Route::Home);
    assert_eq!(history.current().path(), "/");

    Ok(())
}

#[test]
fn region_change_before_response_keeps_latest_localities() -> anyhow::Result<()> {
    let api = FakeApi::default();
    let mut form = PointForm::new();

    let first = form.select_region("SC").expect("localities request");
    let second = form.select_region("PR").expect("localities request");

    let second_response = tokio_test::block_on(execute(&api, second));
    let first_response = tokio_test::block_on(execute(&api, first));
    form.apply(second_response);
    form.apply(first_response);

    assert_eq!(form.selected_region(), "PR");
    assert!(form.localities().is_empty());
    assert_eq!(*api.locality_requests.lock(), vec!["PR", "SC"]);

    Ok(())
}

#[test]
fn submission_failure_keeps_page() {
    struct FailingApi;

    #[async_trait]
    impl PointsApi for FailingApi {
        async fn categories(&self) -> Result<Vec<CategoryItem>, EcoletaError> {
            Err(EcoletaError::Http("connection refused".to_string()))
        }

        async fn regions(&self) -> Result<Vec<Region>, EcoletaError> {
            Err(EcoletaError::Http("connection refused".to_string()))
        }

        async fn localities(&self, _region_code: &str) -> Result<Vec<Locality>, EcoletaError> {
            Ok(vec![Locality {
                id: 4204608,
                name: "Criciúma".to_string(),
            }])
        }

        async fn create_point(&self, _point: &NewPoint) -> Result<(), EcoletaError> {
            Err(EcoletaError::Status(500))
        }
    }

    let mut form = PointForm::new();
    for request in form.mount() {
        let response = tokio_test::block_on(execute(&FailingApi, request));
        assert!(form.apply(response).is_empty());
    }
    assert!(form.categories().is_empty());
    assert!(form.regions().is_empty());

    let request = form.select_region("SC").expect("localities request");
    form.apply(tokio_test::block_on(execute(&FailingApi, request)));
    form.select_locality("Criciúma");

    let request = form.submit(None).expect("submit request");
    let effects = form.apply(tokio_test::block_on(execute(&FailingApi, request)));

    assert!(effects.is_empty());
    assert!(form.can_submit());
    assert!(!form.is_submitting());
}
