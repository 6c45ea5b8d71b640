//! End-to-end pipeline test: raw CSV -> preprocess -> processed CSV ->
//! train -> persist -> load -> serve.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use filmscore::data::{load_processed, load_raw, save_processed};
use filmscore::features::preprocess_raw;
use filmscore::features::schema::FEATURE_COUNT;
use filmscore::io::{load_model, save_model, ModelFormat, SaveConfig};
use filmscore::server::{PredictResponse, PredictServer, ServerConfig};
use filmscore::train::{train_model, TrainConfig};
use std::io::Write;
use tower::ServiceExt;

const RAW_HEADER: &str = "movie_title,color,duration,budget,gross,genres,language,country,\
content_rating,num_critic_for_reviews,num_user_for_reviews,num_voted_users,title_year,imdb_score";

const RAW_ROWS: &[&str] = &[
    "Blockbuster One,Color,130,200000000,600000000,Action|Adventure|Sci-Fi,English,USA,PG-13,400,900,900000,2014,7.8",
    "Blockbuster Two,Color,142,180000000,450000000,Action|Adventure,English,USA,PG-13,350,800,750000,2012,7.2",
    "Quiet Drama,Color,105,2000000,9000000,Drama|Romance,English,UK,R,120,300,120000,2010,7.4",
    "Festival Piece,Color,98,1000000,1500000,Drama,French,France,Unrated,80,150,40000,2011,7.6",
    "Kung Fu Classic,Color,110,12000000,80000000,Action,Mandarin,Hong Kong,R,90,200,150000,2004,7.1",
    "Forgotten Sequel,Color,95,80000000,30000000,Action|Comedy,English,USA,PG-13,150,400,90000,2008,5.1",
    "Cheap Horror,Color,88,3000000,11000000,Horror|Thriller,English,USA,R,60,180,45000,2009,4.8",
    "Awful Comedy,Color,92,25000000,12000000,Comedy,English,USA,PG,110,260,70000,2013,4.2",
    "Dull Biopic,Color,121,30000000,22000000,Biography|Drama,English,UK,PG-13,95,210,55000,2015,5.9",
    "Midnight Oddity, Black and White,76,,90000,Horror,German,West Germany,Not Rated,12,40,3000,1977,6.2",
    "Bollywood Hit,Color,165,9000000,40000000,Musical|Romance,Hindi,India,Unrated,70,190,95000,2016,7.3",
    "Flat Thriller,Color,101,15000000,,Thriller,English,Canada,R,55,140,30000,2007,5.4",
    "Space Junk,Color,99,60000000,25000000,Sci-Fi|Action,English,USA,PG-13,130,310,85000,2017,4.9",
    "Old Favorite,Color,112,5000000,28000000,Comedy|Romance,English,USA,TV-Special,85,220,110000,1998,7.0",
];

fn write_raw_csv(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("movie_metadata.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{RAW_HEADER}").unwrap();
    for row in RAW_ROWS {
        writeln!(file, "{row}").unwrap();
    }
    path
}

fn train_config() -> TrainConfig {
    TrainConfig {
        trees: 12,
        max_depth: None,
        seed: Some(7),
    }
}

#[test]
fn test_pipeline_preprocess_train_persist() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = write_raw_csv(&dir);

    let records = load_raw(&raw_path).unwrap();
    assert_eq!(records.len(), RAW_ROWS.len());

    let dataset = preprocess_raw(&records).unwrap();
    assert_eq!(dataset.len(), RAW_ROWS.len());
    assert_eq!(dataset.features.ncols(), FEATURE_COUNT);
    // Scores >= 7: rows 0, 1, 2, 3, 4, 10, 13.
    assert_eq!(dataset.labels.iter().filter(|l| **l).count(), 7);

    // Processed CSV round-trips exactly.
    let processed_path = dir.path().join("processed.csv");
    save_processed(&dataset, &processed_path).unwrap();
    let reloaded = load_processed(&processed_path).unwrap();
    assert_eq!(reloaded.labels, dataset.labels);
    assert_eq!(reloaded.features, dataset.features);

    // Train and persist, then verify the loaded model predicts
    // identically to the in-memory one.
    let outcome = train_model(&reloaded, &train_config()).unwrap();
    assert!(outcome.train_accuracy > 0.6);

    let model_path = dir.path().join("model.json");
    save_model(
        &outcome.artifact,
        &model_path,
        &SaveConfig::new(ModelFormat::Json),
    )
    .unwrap();
    let loaded = load_model(&model_path).unwrap();

    for i in 0..reloaded.len() {
        let row = reloaded.features.row(i).to_vec();
        assert_eq!(
            outcome.artifact.forest.class_distribution(&row).unwrap(),
            loaded.forest.class_distribution(&row).unwrap()
        );
    }
}

#[tokio::test]
async fn test_pipeline_serves_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = write_raw_csv(&dir);

    let records = load_raw(&raw_path).unwrap();
    let dataset = preprocess_raw(&records).unwrap();
    let outcome = train_model(&dataset, &train_config()).unwrap();

    let server = PredictServer::new(ServerConfig::default(), outcome.artifact);
    let app = server.router();

    let body = serde_json::json!({
        "budget": 1_000_000.0,
        "gross": 5_000_000.0,
        "duration": 120.0,
        "num_critic_for_reviews": 50,
        "num_user_for_reviews": 100,
        "num_voted_users": 20_000,
        "title_year": 2015,
        "color": true,
        "genres": "Action|Comedy",
        "language": "English",
        "country": "USA",
        "content_rating": "PG-13"
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: PredictResponse = serde_json::from_slice(&bytes).unwrap();
    assert!((0.0..=1.0).contains(&parsed.is_good_probability));
    if parsed.is_good_probability != 0.5 {
        assert_eq!(parsed.is_good, parsed.is_good_probability > 0.5);
    }
}
