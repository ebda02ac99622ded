use yew::prelude::*;

use crate::api::RestClient;

#[derive(Properties, PartialEq, Clone)]
pub struct MessagesDashboardProps {
    /// Transport for the templates endpoint.
    pub client: RestClient,
}
