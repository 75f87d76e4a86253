//! VTEX checkout client

use crate::context::{InstanceOptions, IoContext};
use crate::error::Result;
use crate::http::{HttpClient, vtex_headers};
use crate::registry::{ServiceClient, ServiceName};
use serde::Serialize;
use serde_json::Value;

const ORDER_FORM_PATH: &str = "api/checkout/pub/orderForm";

/// Order form sections requested on every read
pub const EXPECTED_ORDER_FORM_SECTIONS: [&str; 15] = [
    "items",
    "totalizers",
    "clientProfileData",
    "shippingData",
    "paymentData",
    "sellers",
    "messages",
    "marketingData",
    "clientPreferencesData",
    "storePreferencesData",
    "giftRegistryData",
    "ratesAndBenefitsData",
    "openTextField",
    "commercialConditionData",
    "customData",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderFormRequest {
    expected_order_form_sections: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct CheckoutClient {
    http: HttpClient,
}

impl CheckoutClient {
    /// # Errors
    /// Returns `ClientError::Configuration` for a malformed endpoint or token
    pub fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self> {
        let base_url = context.endpoint(&context.services().checkout.base_url);
        let http = HttpClient::new(&base_url, context, options, vtex_headers(context)?)?;
        Ok(Self { http })
    }

    /// Read an order form, or open a new one when `order_form_id` is `None`
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self))]
    pub async fn order_form(&self, order_form_id: Option<&str>) -> Result<Value> {
        let path = order_form_id.map_or_else(
            || ORDER_FORM_PATH.to_string(),
            |id| format!("{ORDER_FORM_PATH}/{}", urlencoding::encode(id)),
        );
        let body = OrderFormRequest {
            expected_order_form_sections: &EXPECTED_ORDER_FORM_SECTIONS,
        };

        self.http.post(&path, &body, "checkout-orderform").await
    }
}

impl ServiceClient for CheckoutClient {
    const NAME: ServiceName = ServiceName::Checkout;

    fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self> {
        Self::new(context, options)
    }
}
