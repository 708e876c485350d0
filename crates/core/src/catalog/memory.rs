use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::product::{NewProduct, Product, ProductId, ProductPatch};

use super::{ApiError, ProductApi};

/// Id the demo service echoes for every created product.
pub const ECHOED_CREATE_ID: ProductId = ProductId(21);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Create(NewProduct),
    Update(ProductId, ProductPatch),
    Delete(ProductId),
}

/// In-process stand-in for the demo product service.
///
/// Like the hosted service it never persists writes: `list` keeps returning
/// the seeded products, `create` echoes a fixed id, and `update`/`delete`
/// succeed without changing anything.
#[derive(Debug, Default)]
pub struct InMemoryProductApi {
    products: Vec<Product>,
    offline: Mutex<bool>,
    calls: Mutex<Vec<ApiCall>>,
}

impl InMemoryProductApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products, ..Self::default() }
    }

    pub fn demo() -> Self {
        Self::with_products(demo_products())
    }

    /// While offline every call fails with [`ApiError::Network`].
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock() = offline;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        self.calls.lock().push(call);
        if *self.offline.lock() {
            return Err(ApiError::Network("demo product service is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductApi for InMemoryProductApi {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.record(ApiCall::List)?;
        Ok(self.products.clone())
    }

    async fn create(&self, input: &NewProduct) -> Result<Product, ApiError> {
        self.record(ApiCall::Create(input.clone()))?;
        Ok(input.clone().into_product(ECHOED_CREATE_ID))
    }

    async fn update(&self, id: ProductId, patch: &ProductPatch) -> Result<(), ApiError> {
        self.record(ApiCall::Update(id, patch.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        self.record(ApiCall::Delete(id))
    }
}

pub fn demo_products() -> Vec<Product> {
    let product = |id: u64, title: &str, cents: i64, category: &str, description: &str| Product {
        id: ProductId(id),
        title: title.to_string(),
        price: Decimal::new(cents, 2),
        description: description.to_string(),
        category: category.to_string(),
        image: None,
    };

    vec![
        product(
            1,
            "Fjallraven Foldsack No. 1 Backpack",
            10995,
            "men's clothing",
            "Fits 15 inch laptops and everyday essentials.",
        ),
        product(2, "Mens Casual Premium Slim Fit T-Shirts", 2230, "men's clothing", "Slim fit."),
        product(3, "Mens Cotton Jacket", 5599, "men's clothing", "Great outerwear jacket."),
        product(
            5,
            "John Hardy Women's Legends Naga Bracelet",
            69500,
            "jewelery",
            "Gold and silver dragon station chain bracelet.",
        ),
        product(6, "Solid Gold Petite Micropave", 16800, "jewelery", "Satisfaction guaranteed."),
        product(9, "WD 2TB Elements Portable External Hard Drive", 6400, "electronics", "USB 3.0."),
        product(10, "SanDisk SSD PLUS 1TB Internal SSD", 10900, "electronics", "SATA III 6 Gb/s."),
        product(
            15,
            "BIYLACLESEN Women's 3-in-1 Snowboard Jacket",
            5699,
            "women's clothing",
            "Detachable liner.",
        ),
        product(18, "MBJ Women's Solid Short Sleeve Boat Neck", 985, "women's clothing", "Rayon."),
        product(20, "DANVOUY Womens T Shirt Casual Cotton Short", 1299, "women's clothing", "Cotton."),
    ]
}
