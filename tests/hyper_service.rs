#![cfg(feature = "hyper-service")]

use waypoint::hyper_service::DispatchService;
use waypoint::{Context, Response, RouterBuilder};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::service::Service;

fn service() -> DispatchService {
    let mut b = RouterBuilder::new();
    b.get("/hello/{name}", |cx: &Context<'_>| {
        Response::new(format!("hello, {}!", cx.param("name").unwrap()).into_bytes())
    });
    b.post("/echo", |cx: &Context<'_>| Response::new(cx.request().body().clone()));
    DispatchService::new(b.build().unwrap())
}

async fn call(svc: &DispatchService, req: http::Request<Full<Bytes>>) -> (u16, Bytes) {
    let res = svc.call(req).await.unwrap();
    let status = res.status().as_u16();
    let body = res.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

#[tokio::test]
async fn hyper_service() {
    let svc = service();

    let req = http::Request::get("/hello/world")
        .body(Full::new(Bytes::new()))
        .unwrap();
    assert_eq!(call(&svc, req).await, (200, Bytes::from("hello, world!")));

    let req = http::Request::post("/echo")
        .body(Full::new(Bytes::from_static(b"ping")))
        .unwrap();
    assert_eq!(call(&svc, req).await, (200, Bytes::from("ping")));

    let req = http::Request::head("/hello/world")
        .body(Full::new(Bytes::new()))
        .unwrap();
    assert_eq!(call(&svc, req).await, (200, Bytes::new()));

    let req = http::Request::get("/missing")
        .body(Full::new(Bytes::new()))
        .unwrap();
    assert_eq!(call(&svc, req).await, (404, Bytes::new()));
}

#[tokio::test]
async fn clones_share_tables() {
    let svc = service();
    let other = svc.clone();
    assert!(std::sync::Arc::ptr_eq(svc.dispatcher(), other.dispatcher()));

    let req = http::Request::get("/hello/clone")
        .body(Full::new(Bytes::new()))
        .unwrap();
    assert_eq!(call(&other, req).await.1, Bytes::from("hello, clone!"));
}
