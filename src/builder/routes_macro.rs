/// Builds a [`RouterBuilder`](crate::RouterBuilder) from a route table.
///
/// ```
/// use waypoint::{routes, Context, Response};
///
/// fn hello(cx: &Context<'_>) -> Response {
///     Response::new(format!("hello, {}", cx.param("name").unwrap_or("?")).into_bytes())
/// }
///
/// let dispatcher = routes! {
///     GET "/hello/{name}" => hello,
///     @ "/api" => |api: &mut waypoint::RouterBuilder| {
///         api.post("/echo", waypoint::request(|req, _| Response::new(req.body().clone())));
///     },
///     404 "/(.*)" => |_: &Context<'_>| Response::new(b"nothing here".to_vec())
/// }
/// .build()
/// .unwrap();
/// # let _ = dispatcher;
/// ```
#[macro_export]
macro_rules! routes {
    {@entry $b:expr, @, $prefix:expr, $block:expr} => {
        $b.mount($prefix, $block)
    };
    {@entry $b:expr, BEFORE, $pattern:expr, $h:expr} => {
        $b.before($pattern, $h)
    };
    {@entry $b:expr, AFTER, $pattern:expr, $h:expr} => {
        $b.after($pattern, $h)
    };
    {@entry $b:expr, 404, $pattern:expr, $h:expr} => {
        $b.map_404($pattern, $h)
    };
    {@entry $b:expr, 500, $pattern:expr, $h:expr} => {
        $b.map_500($pattern, $h)
    };
    {@entry $b:expr, ALL, $pattern:expr, $h:expr} => {
        $b.all($pattern, $h)
    };
    {@entry $b:expr, $method:ident, $pattern:expr, $h:expr} => {
        $b.route($crate::Method::$method, $pattern, $h)
    };

    {$($method:tt $pattern:expr => $h:expr),+ $(,)?} => {{
        let mut __builder = $crate::RouterBuilder::new();
        $($crate::routes!(@entry __builder, $method, $pattern, $h);)+
        __builder
    }};
}
