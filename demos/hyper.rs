use waypoint::hyper_service::DispatchService;
use waypoint::{params, Context, Response, RouterBuilder, StatusCode};

use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

fn text(status: StatusCode, body: impl Into<String>) -> Response {
    let mut res = Response::new(body.into().into_bytes());
    *res.status_mut() = status;
    res
}

fn arith(op: fn(i64, i64) -> Option<i64>, sign: &'static str) -> impl waypoint::Handle {
    params(move |p| -> Result<Response, std::num::ParseIntError> {
        let a: i64 = p.nth(0).unwrap_or_default().parse()?;
        let b: i64 = p.nth(1).unwrap_or_default().parse()?;
        Ok(match op(a, b) {
            Some(r) => text(StatusCode::OK, format!("{} {} {} = {}", a, sign, b, r)),
            None => text(StatusCode::BAD_REQUEST, "undefined"),
        })
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut router = RouterBuilder::new();
    router
        .get(r"/(\d+)/plus/(\d+)", arith(i64::checked_add, "+"))
        .get(r"/(\d+)/minus/(\d+)", arith(i64::checked_sub, "-"))
        .get(r"/(\d+)/multiply/(\d+)", arith(i64::checked_mul, "*"))
        .get(r"/(\d+)/divide/(\d+)", arith(i64::checked_div, "/"))
        .map_404("/(.*)", |_: &Context<'_>| {
            text(
                StatusCode::NOT_FOUND,
                "try /{number}/plus|minus|multiply|divide/{number}",
            )
        })
        .map_500("/(.*)", |_: &Context<'_>| {
            text(StatusCode::INTERNAL_SERVER_ERROR, "An internal error has occurred :(")
        });
    let service = DispatchService::new(router.build()?);

    let addr = "127.0.0.1:8000";
    let listener = TcpListener::bind(addr).await?;
    println!("Listening on http://{}", addr);
    println!("try: http://{}/40/plus/2", addr);

    loop {
        let (stream, _) = listener.accept().await?;
        let service = service.clone();
        tokio::spawn(async move {
            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                eprintln!("connection error: {}", e);
            }
        });
    }
}
