//! Company browser flows against the mock backend.

#![allow(clippy::unwrap_used)]

use leadscout_client::components::{SortColumn, SortDirection};
use leadscout_client::pages::CompaniesPage;
use leadscout_client::pages::companies::{MSG_EXPORT_FAILED, MSG_NO_COMPANIES};
use leadscout_core::{ActivityId, CompanyFilter, CompanyId, PhoneFilter};
use leadscout_integration_tests::{
    Method, MockBackend, StatusCode, company_json, signed_in, user,
};
use serde_json::json;

async fn page_with_companies(backend: &MockBackend) -> CompaniesPage {
    backend.reply_json(
        Method::GET,
        "/api/companies/",
        StatusCode::OK,
        json!([
            company_json(1, "Beta Kafe", "İzmir", Some(4.1)),
            company_json(2, "Alfa Kafe", "Ankara", None),
            company_json(3, "Gama Kafe", "Bursa", Some(4.8)),
        ]),
    );
    let api = backend.client(signed_in(user(7, "elif", false)).unwrap()).unwrap();
    CompaniesPage::new(api)
}

fn settings_json() -> serde_json::Value {
    json!({
        "sehirler": ["Ankara", "İzmir"],
        "asama_secenekleri": ["Yeni", "Görüşüldü", "Teklif"],
        "aktivite_tipleri": ["Arama", "Ziyaret"]
    })
}

// ============================================================================
// List, filter and sort
// ============================================================================

#[tokio::test]
async fn list_sends_only_selected_filters() {
    let backend = MockBackend::start().await.unwrap();
    let mut page = page_with_companies(&backend).await;
    page.set_filter(CompanyFilter {
        sehir: Some("İzmir".into()),
        ilce: Some("Hepsi".into()),
        asama: None,
        telefon: PhoneFilter::WithPhone,
    });

    let view = page.load().await.unwrap();
    assert_eq!(view.rows.items().len(), 3);

    let request = &backend.requests_to("/api/companies/")[0];
    assert_eq!(
        request.query_pairs(),
        vec![
            ("sehir_filtre".to_owned(), "İzmir".to_owned()),
            ("telefon_filtre".to_owned(), "var".to_owned()),
        ]
    );
}

#[tokio::test]
async fn header_clicks_sort_locally() {
    let backend = MockBackend::start().await.unwrap();
    let mut page = page_with_companies(&backend).await;
    page.load().await.unwrap();

    let names = |view: &leadscout_client::pages::companies::CompanyTableView| -> Vec<String> {
        view.rows
            .items()
            .iter()
            .map(|r| r.cells[0].clone())
            .collect()
    };

    let view = page.sort_by(SortColumn::FirmaAdi);
    assert_eq!(names(&view), ["Alfa Kafe", "Beta Kafe", "Gama Kafe"]);
    assert_eq!(view.sort.direction, SortDirection::Asc);

    let view = page.sort_by(SortColumn::FirmaAdi);
    assert_eq!(names(&view), ["Gama Kafe", "Beta Kafe", "Alfa Kafe"]);

    let view = page.sort_by(SortColumn::Rating);
    assert_eq!(names(&view), ["Alfa Kafe", "Beta Kafe", "Gama Kafe"]);

    // Sorting never refetches.
    assert_eq!(backend.requests_to("/api/companies/").len(), 1);
}

#[tokio::test]
async fn empty_list_shows_message() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(Method::GET, "/api/companies/", StatusCode::OK, json!([]));
    let api = backend.client(signed_in(user(7, "elif", false)).unwrap()).unwrap();

    let view = CompaniesPage::new(api).load().await.unwrap();
    assert_eq!(view.rows.empty_message(), Some(MSG_NO_COMPANIES));
}

#[tokio::test]
async fn filter_options_scope_districts_to_city() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(
        Method::GET,
        "/api/companies/filters/cities",
        StatusCode::OK,
        json!(["Ankara", "İzmir"]),
    );
    backend.reply_json(
        Method::GET,
        "/api/companies/filters/districts",
        StatusCode::OK,
        json!(["Bornova", "Konak"]),
    );
    backend.reply_json(Method::GET, "/api/config/", StatusCode::OK, settings_json());

    let mut page = page_with_companies(&backend).await;
    page.set_filter(CompanyFilter {
        sehir: Some("İzmir".into()),
        ..CompanyFilter::default()
    });
    let options = page.filter_options().await.unwrap();

    assert_eq!(options.cities, ["Hepsi", "Ankara", "İzmir"]);
    assert_eq!(options.districts, ["Hepsi", "Bornova", "Konak"]);
    assert_eq!(options.stages, ["Hepsi", "Yeni", "Görüşüldü", "Teklif"]);

    let request = &backend.requests_to("/api/companies/filters/districts")[0];
    assert_eq!(
        request.query_pairs(),
        vec![("sehir".to_owned(), "İzmir".to_owned())]
    );
}

// ============================================================================
// Detail panel
// ============================================================================

#[tokio::test]
async fn detail_stage_and_activities() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(
        Method::GET,
        "/api/companies/3",
        StatusCode::OK,
        company_json(3, "Gama Kafe", "Bursa", Some(4.8)),
    );
    backend.reply_json(
        Method::GET,
        "/api/companies/3/activities",
        StatusCode::OK,
        json!([
            {"id": 11, "aktivite_tipi": "Arama", "sonuc": "Geri dönecek", "created_at": "2024-05-03T09:15:00"}
        ]),
    );
    backend.reply_json(Method::GET, "/api/config/", StatusCode::OK, settings_json());

    let mut updated = company_json(3, "Gama Kafe", "Bursa", Some(4.8));
    updated["asama"] = json!("Teklif");
    backend.reply_json(Method::PATCH, "/api/companies/3", StatusCode::OK, updated);
    backend.reply_json(
        Method::POST,
        "/api/companies/3/activities",
        StatusCode::OK,
        json!({"id": 12, "aktivite_tipi": "Ziyaret", "sonuc": null, "created_at": "2024-05-04T10:00:00"}),
    );
    backend.reply_bytes(
        Method::DELETE,
        "/api/companies/3/activities/11",
        StatusCode::NO_CONTENT,
        None,
        Vec::new(),
    );

    let mut page = page_with_companies(&backend).await;
    page.load().await.unwrap();

    let detail = page.select(CompanyId::new(3)).await.unwrap();
    assert_eq!(detail.title, "Gama Kafe");
    assert_eq!(detail.field("Şehir"), "Bursa");
    assert_eq!(detail.activities.len(), 1);
    assert_eq!(detail.activity_types, ["Arama", "Ziyaret"]);
    assert_eq!(page.selected(), Some(CompanyId::new(3)));

    let company = page.update_stage(CompanyId::new(3), "Teklif").await.unwrap();
    assert_eq!(company.asama.as_deref(), Some("Teklif"));
    let patch = &backend.requests_to("/api/companies/3")
        .into_iter()
        .find(|r| r.method == Method::PATCH)
        .unwrap();
    assert_eq!(patch.json(), json!({"asama": "Teklif"}));
    let row = page
        .companies()
        .iter()
        .find(|c| c.id == Some(CompanyId::new(3)))
        .unwrap();
    assert_eq!(row.asama.as_deref(), Some("Teklif"));

    page.add_activity(CompanyId::new(3), "Ziyaret", Some("  "))
        .await
        .unwrap();
    let post = &backend.requests_to("/api/companies/3/activities")
        .into_iter()
        .find(|r| r.method == Method::POST)
        .unwrap();
    assert_eq!(post.json(), json!({"aktivite_tipi": "Ziyaret", "sonuc": null}));

    page.delete_activity(CompanyId::new(3), ActivityId::new(11))
        .await
        .unwrap();
    assert_eq!(
        backend.requests_to("/api/companies/3/activities/11").len(),
        1
    );
    // The config lists are fetched once per page.
    assert_eq!(backend.requests_to("/api/config/").len(), 1);
}

#[tokio::test]
async fn delete_company_clears_selection_and_reloads() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_bytes(
        Method::DELETE,
        "/api/companies/2",
        StatusCode::OK,
        Some("application/json"),
        br#"{"message": "Firma silindi"}"#.to_vec(),
    );
    backend.reply_json(
        Method::GET,
        "/api/companies/2",
        StatusCode::OK,
        company_json(2, "Alfa Kafe", "Ankara", None),
    );
    backend.reply_json(Method::GET, "/api/companies/2/activities", StatusCode::OK, json!([]));
    backend.reply_json(Method::GET, "/api/config/", StatusCode::OK, settings_json());

    let mut page = page_with_companies(&backend).await;
    page.load().await.unwrap();
    page.select(CompanyId::new(2)).await.unwrap();

    page.delete_company(CompanyId::new(2)).await.unwrap();
    assert_eq!(page.selected(), None);
    assert_eq!(backend.requests_to("/api/companies/").len(), 2);
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn export_writes_file() {
    let backend = MockBackend::start().await.unwrap();
    let xlsx = b"PK\x03\x04fake-workbook".to_vec();
    backend.reply_bytes(
        Method::GET,
        "/api/excel/export",
        StatusCode::OK,
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        xlsx.clone(),
    );

    let dir = tempfile::tempdir().unwrap();
    let mut page = page_with_companies(&backend).await;
    page.set_filter(CompanyFilter {
        asama: Some("Teklif".into()),
        ..CompanyFilter::default()
    });
    let path = page.export(dir.path()).await.unwrap();

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("firmalar_"), "{name}");
    assert!(name.ends_with(".xlsx"), "{name}");
    assert_eq!(std::fs::read(&path).unwrap(), xlsx);

    let request = &backend.requests_to("/api/excel/export")[0];
    assert_eq!(
        request.query_pairs(),
        vec![("asama_filtre".to_owned(), "Teklif".to_owned())]
    );
}

#[tokio::test]
async fn export_failure_uses_generic_message() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(
        Method::GET,
        "/api/excel/export",
        StatusCode::NOT_FOUND,
        json!({"detail": "Firma bulunamadı"}),
    );

    let dir = tempfile::tempdir().unwrap();
    let page = page_with_companies(&backend).await;
    let err = page.export(dir.path()).await.unwrap_err();

    assert_eq!(err.user_message(), MSG_EXPORT_FAILED);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
