use rust_decimal::Decimal;

use super::layout::{
    format_amount, format_date, sanitize_filename_component, Block, DocumentLayout, Table, Tone,
};
use crate::core::{AtelierError, Enterprise, Intervention, InterventionStatus};

/// Banner texts for the warranty state.
pub const UNDER_WARRANTY: &str = "SOUS GARANTIE";
pub const OUT_OF_WARRANTY: &str = "HORS GARANTIE";

/// Fallback business name when no enterprise profile is available.
const DEFAULT_BUSINESS: &str = "ELECTRO";

/// Build the printable intervention sheet ("fiche intervention").
///
/// The warranty banner reads "SOUS GARANTIE" if and only if the
/// intervention carries a non-nil partner-store reference — store-linked
/// repairs are partner-warranty work — and "HORS GARANTIE" otherwise.
pub fn intervention_sheet(
    intervention: &Intervention,
    enterprise: Option<&Enterprise>,
) -> Result<DocumentLayout, AtelierError> {
    for item in &intervention.line_items {
        if item.quantity <= Decimal::ZERO {
            return Err(AtelierError::Render(format!(
                "ligne '{}' avec quantité invalide",
                item.name
            )));
        }
    }

    let mut blocks = Vec::new();

    // Enterprise identity on the left, sheet title and dates on the right.
    let mut meta_lines = vec![format!(
        "DATE DÉBUT: {}",
        format_date(intervention.start_date)
    )];
    if intervention.status == InterventionStatus::Done {
        if let Some(end) = intervention.end_date {
            meta_lines.push(format!("DATE FIN: {}", format_date(end)));
        }
    }
    blocks.push(Block::Header {
        business: business_name(enterprise),
        business_lines: enterprise_header_lines(enterprise, "Le service de confiance"),
        title: "FICHE INTERVENTION".into(),
        meta_lines,
    });

    let under_warranty = intervention.under_warranty();
    blocks.push(Block::Banner {
        text: if under_warranty {
            UNDER_WARRANTY.into()
        } else {
            OUT_OF_WARRANTY.into()
        },
        tone: if under_warranty {
            Tone::Positive
        } else {
            Tone::Negative
        },
    });

    if under_warranty {
        if let Some(store) = &intervention.store_name {
            let mut info = format!("Magasin: {store}");
            if let Some(city) = &intervention.store_city {
                info.push_str(&format!(" - {city}"));
            }
            if let Some(contact) = &intervention.store_contact {
                info.push_str(&format!(" ({contact})"));
            }
            blocks.push(Block::Paragraph {
                title: None,
                lines: vec![info],
            });
        }
    }

    blocks.push(client_device_table(intervention));

    blocks.push(Block::Table(Table {
        title: None,
        columns: vec!["PANNE RÉCLAMÉE".into(), "PANNE CONSTATÉE".into()],
        rows: vec![vec![
            or_dash(&intervention.reported_fault),
            or_dash(&intervention.observed_fault),
        ]],
        footer: None,
    }));

    if !intervention.line_items.is_empty() {
        blocks.push(items_table(intervention));
    }

    blocks.push(Block::Paragraph {
        title: Some("TRAVAIL EFFECTUÉ & NOTES".into()),
        lines: vec![
            format!("Travail effectué: {}", or_dash(&intervention.work_performed)),
            format!(
                "Notes: {}",
                intervention.notes.as_deref().unwrap_or("-")
            ),
            format!(
                "Bon de Réparation: {}",
                intervention.repair_order.as_deref().unwrap_or("-")
            ),
        ],
    });

    blocks.push(Block::Footer(footer_line(
        enterprise,
        "Service Après-Vente",
    )));

    let client = intervention.client_name.as_deref().unwrap_or("Client");
    let filename = format!(
        "Fiche_Intervention_{}.pdf",
        sanitize_filename_component(client)
    );

    Ok(DocumentLayout { filename, blocks })
}

fn client_device_table(intervention: &Intervention) -> Block {
    let client_cell = format!(
        "Nom: {}\nTél: {}\nAdresse: {}\nVille: {}",
        intervention.client_name.as_deref().unwrap_or(""),
        intervention.client_phone.as_deref().unwrap_or(""),
        intervention.client_address.as_deref().unwrap_or("-"),
        intervention.client_city.as_deref().unwrap_or("-"),
    );
    let device_cell = format!(
        "Modèle: {}\nN° Série: {}\nDate Achat: {}\nFin Garantie: {}",
        intervention.device_name.as_deref().unwrap_or(""),
        intervention.device_serial.as_deref().unwrap_or(""),
        intervention
            .device_purchase_date
            .map(format_date)
            .unwrap_or_else(|| "-".into()),
        intervention
            .device_warranty_end
            .map(format_date)
            .unwrap_or_else(|| "-".into()),
    );
    Block::Table(Table {
        title: None,
        columns: vec!["CLIENT".into(), "APPAREIL".into()],
        rows: vec![vec![client_cell, device_cell]],
        footer: None,
    })
}

fn items_table(intervention: &Intervention) -> Block {
    let rows = intervention
        .line_items
        .iter()
        .map(|item| {
            vec![
                or_dash(&item.reference),
                or_dash(&item.name),
                item.quantity.to_string(),
                format_amount(item.total_ht()),
            ]
        })
        .collect();
    // Grand total is the sum of line totals, not the backend snapshot.
    let grand_total: Decimal = intervention.line_items.iter().map(|i| i.total_ht()).sum();
    Block::Table(Table {
        title: Some("ARTICLES / INTERVENTIONS".into()),
        columns: vec![
            "Référence".into(),
            "Désignation".into(),
            "Qté".into(),
            "Total HT".into(),
        ],
        rows,
        footer: Some(("TOTAL INTERVENTION:".into(), format_amount(grand_total))),
    })
}

pub(super) fn business_name(enterprise: Option<&Enterprise>) -> String {
    enterprise
        .map(|e| e.name.to_uppercase())
        .unwrap_or_else(|| DEFAULT_BUSINESS.into())
}

pub(super) fn enterprise_header_lines(
    enterprise: Option<&Enterprise>,
    fallback: &str,
) -> Vec<String> {
    match enterprise {
        Some(e) => {
            let mut lines = Vec::new();
            if let Some(activity) = &e.activity {
                lines.push(activity.clone());
            }
            if let Some(address) = &e.address {
                lines.push(address.clone());
            }
            if let Some(phone) = &e.phone {
                lines.push(format!("Tél: {phone}"));
            }
            lines
        }
        None => vec![fallback.to_string()],
    }
}

fn footer_line(enterprise: Option<&Enterprise>, fallback: &str) -> String {
    match enterprise {
        Some(e) => {
            let mut text = e.name.clone();
            if let Some(address) = &e.address {
                text.push_str(&format!(" - {address}"));
            }
            if let Some(city) = &e.city {
                text.push_str(&format!(" - {city}"));
            }
            if let Some(site) = &e.website {
                text.push_str(&format!(" - {site}"));
            }
            text
        }
        None => fallback.to_string(),
    }
}

fn or_dash(s: &str) -> String {
    if s.is_empty() { "-".into() } else { s.into() }
}
