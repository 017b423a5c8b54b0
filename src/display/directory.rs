//! ATM and service directory formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Atm, Service};

#[derive(Tabled)]
struct AtmRow {
    #[tabled(rename = "ATM")]
    id: String,
    #[tabled(rename = "Address")]
    address: String,
}

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Pays into")]
    target: String,
}

pub fn format_atm_list(atms: &[Atm]) -> String {
    if atms.is_empty() {
        return "No ATMs registered.".to_string();
    }

    let rows = atms.iter().map(|a| AtmRow {
        id: a.id.to_string(),
        address: a.address.clone(),
    });
    Table::new(rows).with(Style::psql()).to_string()
}

pub fn format_service_list(services: &[Service]) -> String {
    if services.is_empty() {
        return "No services registered.".to_string();
    }

    let rows = services.iter().map(|s| ServiceRow {
        id: s.id.to_string(),
        name: s.name.clone(),
        target: s.target().to_string(),
    });
    Table::new(rows).with(Style::psql()).to_string()
}
