//! Prometheus request metrics behind the `metrics` feature.
//!
//! [`MetricsLayer`] boxes the wrapped service in both states so the app has
//! one middleware type whether or not metrics were configured.

use std::io;
use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;

const NAMESPACE: &str = "estoque";
const ENDPOINT: &str = "/metrics";

/// Build request metrics exposed at `/metrics` under the `estoque` namespace.
///
/// # Errors
/// Returns an error when the collectors cannot be registered.
pub(crate) fn build_metrics() -> io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint(ENDPOINT)
        .build()
        .map_err(|err| io::Error::other(format!("configure Prometheus metrics: {err}")))
}

/// Request metrics when enabled, a pass-through otherwise.
#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |metrics| Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self {
            Self::Enabled(metrics) => {
                let fut = Compat::new(PrometheusMetrics::clone(metrics)).new_transform(service);
                Box::pin(async move { Ok(boxed::service(fut.await?)) })
            }
            Self::Disabled => {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Box::pin(async move { Ok(boxed::service(svc)) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    async fn call(layer: MetricsLayer, uris: &[&str]) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .wrap(layer)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let mut last = (StatusCode::OK, String::new());
        for uri in uris {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request())
                .await;
            let status = res.status();
            let body = test::read_body(res).await;
            last = (status, String::from_utf8_lossy(&body).into_owned());
        }
        last
    }

    #[rstest]
    #[actix_web::test]
    async fn disabled_layer_leaves_metrics_endpoint_unrouted() {
        let (status, _) = call(MetricsLayer::from_option(None), &["/", "/metrics"]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn enabled_layer_counts_requests() {
        let metrics = build_metrics().expect("metrics build");
        let (status, body) = call(MetricsLayer::from_option(Some(metrics)), &["/", "/metrics"]).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("estoque_http_requests_total"), "body: {body}");
    }
}
