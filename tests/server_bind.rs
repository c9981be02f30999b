use shorturl::server::bind_listener;

#[tokio::test]
async fn test_bind_occupied_port_fails() {
    let occupied = bind_listener("127.0.0.1:0").await.unwrap();
    let addr = occupied.local_addr().unwrap();

    let err = bind_listener(&addr.to_string()).await.unwrap_err();

    assert!(err.to_string().contains(&addr.to_string()));
}
