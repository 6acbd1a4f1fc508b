//! Read-back model for core Services. Only the load-balancer status the
//! ingress lookup needs is typed; everything else a cluster returns is
//! ignored.

use serde::Deserialize;

use crate::ObjectMeta;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub status: ServiceStatus,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceStatus {
    pub load_balancer: LoadBalancerStatus,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadBalancerStatus {
    pub ingress: Vec<LoadBalancerIngress>,
}

impl LoadBalancerStatus {
    /// find any ip or host
    pub fn find_any_ip_or_host(&self) -> Option<&str> {
        self.ingress.iter().find_map(|ingress| ingress.host_or_ip())
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadBalancerIngress {
    pub hostname: Option<String>,
    pub ip: Option<String>,
}

impl LoadBalancerIngress {
    /// return either host or ip
    pub fn host_or_ip(&self) -> Option<&str> {
        if let Some(host) = &self.hostname {
            Some(host)
        } else if let Some(ip) = &self.ip {
            Some(ip)
        } else {
            None
        }
    }
}
