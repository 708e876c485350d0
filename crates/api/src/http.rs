use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::debug;

use storefront_core::config::ApiConfig;
use storefront_core::{ApiError, NewProduct, Product, ProductApi, ProductId, ProductPatch};

use crate::wire::{WireCreateEcho, WireNewProduct, WirePatch, WireProduct};

/// [`ProductApi`] over HTTPS/JSON against a `/products` resource.
#[derive(Clone, Debug)]
pub struct HttpProductApi {
    client: Client,
    base_url: String,
}

impl HttpProductApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ApiError::Network(format!("could not build http client: {error}")))?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}/products/{id}", self.base_url)
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, ApiError> {
        let started = Instant::now();
        let response = build(self.client.request(method.clone(), &url))
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;

        let status = response.status();
        debug!(
            event_name = "api.http.response",
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "product api call completed"
        );

        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), url });
        }
        Ok(response)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|error| ApiError::Decode(error.to_string()))
}

fn into_product(wire: WireProduct) -> Result<Product, ApiError> {
    Product::try_from(wire).map_err(|error| ApiError::Decode(error.to_string()))
}

#[async_trait::async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.send(Method::GET, self.products_url(), |request| request).await?;
        let wire: Vec<WireProduct> = decode(response).await?;
        wire.into_iter().map(into_product).collect()
    }

    /// The product is rebuilt from `input`; the response body only contributes its id.
    async fn create(&self, input: &NewProduct) -> Result<Product, ApiError> {
        let body = WireNewProduct::from(input);
        let response =
            self.send(Method::POST, self.products_url(), |request| request.json(&body)).await?;

        let echo = response.json::<WireCreateEcho>().await.unwrap_or_else(|error| {
            debug!(
                event_name = "api.http.create_echo_ignored",
                error = %error,
                "create response body was not readable"
            );
            WireCreateEcho::default()
        });
        Ok(input.clone().into_product(ProductId(echo.id.unwrap_or_default())))
    }

    async fn update(&self, id: ProductId, patch: &ProductPatch) -> Result<(), ApiError> {
        let body = WirePatch::from(patch);
        self.send(Method::PUT, self.product_url(id), |request| request.json(&body)).await?;
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        self.send(Method::DELETE, self.product_url(id), |request| request).await?;
        Ok(())
    }
}
