use rxledger::application::dispatcher::Invocation;
use rxledger::error::ErrorKind;

mod common;
use common::{contract, create_args};

#[tokio::test]
async fn test_invocation_surface() {
    let contract = contract();

    contract
        .invoke(&Invocation::new("createOrder", create_args("K1", "O1")))
        .await
        .unwrap();
    contract
        .invoke(&Invocation::new(
            "advanceOrder",
            ["K1", "PfizerCo", "Shipped"],
        ))
        .await
        .unwrap();

    let payload = contract
        .invoke(&Invocation::new("queryOrder", ["K1"]))
        .await
        .unwrap()
        .expect("query returns the record");
    let record: serde_json::Value = serde_json::from_slice(&payload).unwrap();
    let expected: serde_json::Value = serde_json::from_str(
        r#"{"orderid":"O1","owner":"GeneralHospital","distributor":"PfizerCo","drugid":"DRUG-117","quantity":100,"price":13.40,"status":"Shipped"}"#,
    )
    .unwrap();
    assert_eq!(record, expected);
    assert!(record["price"].is_number());
}

#[tokio::test]
async fn test_original_entry_point_names() {
    let contract = contract();
    contract
        .invoke(&Invocation::new("initLedger", Vec::<String>::new()))
        .await
        .unwrap();
    contract
        .invoke(&Invocation::new(
            "orderTransaction",
            ["ORDER0", "Pfizer", "Cancelled"],
        ))
        .await
        .unwrap();

    let order = contract.store().get("ORDER0").await.unwrap();
    assert_eq!(order.status.as_str(), "Cancelled");
}

#[tokio::test]
async fn test_error_kinds_reported() {
    let contract = contract();

    let cases: Vec<(Invocation, ErrorKind)> = vec![
        (Invocation::new("burnOrder", ["K1"]), ErrorKind::UnknownOperation),
        (Invocation::new("createOrder", ["K1"]), ErrorKind::ArgumentCountError),
        (
            Invocation::new("advanceOrder", ["K404", "PfizerCo", "Shipped"]),
            ErrorKind::NotFound,
        ),
        (Invocation::new("queryOrder", ["K404"]), ErrorKind::NotFound),
    ];

    for (invocation, expected) in cases {
        let err = contract.invoke(&invocation).await.unwrap_err();
        assert_eq!(err.kind(), expected, "{}", invocation.function);
    }

    let mut bad_price = create_args("K1", "O1");
    bad_price[6] = "thirteen".to_string();
    let err = contract
        .invoke(&Invocation::new("createOrder", bad_price))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationError);
}

#[tokio::test]
async fn test_query_all_after_initialize() {
    let contract = contract();
    contract
        .invoke(&Invocation::new("initialize", Vec::<String>::new()))
        .await
        .unwrap();

    let payload = contract
        .invoke(&Invocation::new("queryAllOrders", Vec::<String>::new()))
        .await
        .unwrap()
        .unwrap();
    let all: Vec<serde_json::Value> = serde_json::from_slice(&payload).unwrap();
    assert_eq!(all.len(), 7);
    let keys: Vec<&str> = all.iter().map(|e| e["Key"].as_str().unwrap()).collect();
    assert_eq!(
        keys,
        vec!["ORDER0", "ORDER1", "ORDER2", "ORDER3", "ORDER4", "ORDER5", "ORDER6"]
    );
    assert_eq!(all[4]["Record"]["price"].to_string(), "1313.4");
}
