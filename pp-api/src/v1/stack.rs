use serde::{
    Deserialize,
    Serialize,
};

// Everything one provisioning run needs: where to provision, what to provision, and a few
// auxiliary inputs that some kinds consult while deriving their locals.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackInput<T, P> {
    pub provider_config: P,
    pub target: T,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_config_json: Option<String>,
}

impl<T, P: Default> StackInput<T, P> {
    pub fn new(target: T) -> StackInput<T, P> {
        StackInput {
            provider_config: P::default(),
            target,
            kubernetes_namespace: None,
            docker_config_json: None,
        }
    }
}
