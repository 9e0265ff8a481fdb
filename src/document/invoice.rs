use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::intervention::{business_name, enterprise_header_lines};
use super::layout::{
    format_amount, format_date, sanitize_filename_component, Block, DocumentLayout, Table,
};
use crate::core::{AtelierError, Enterprise, Intervention, Invoice, UNKNOWN_STORE};

/// Divisor deriving the pre-tax total from the tax-included total when
/// the backend omits it (20% VAT assumption).
const VAT_FALLBACK_DIVISOR: Decimal = dec!(1.20);

/// Build the printable consolidated store invoice.
pub fn store_invoice(
    invoice: &Invoice,
    enterprise: Option<&Enterprise>,
) -> Result<DocumentLayout, AtelierError> {
    if invoice.gross_total < Decimal::ZERO {
        return Err(AtelierError::Render(format!(
            "facture {} avec montant TTC négatif",
            invoice.number
        )));
    }

    let mut blocks = Vec::new();

    let mut meta_lines = vec![
        format!("N°: {}", or_dash(&invoice.number)),
        format!("Date: {}", format_date(invoice.issue_date)),
    ];
    if let Some(due) = invoice.due_date {
        meta_lines.push(format!("Échéance: {}", format_date(due)));
    }
    blocks.push(Block::Header {
        business: business_name(enterprise),
        business_lines: enterprise_header_lines(enterprise, ""),
        title: "FACTURE".into(),
        meta_lines,
    });

    let store_name = invoice.store_name.as_deref().unwrap_or(UNKNOWN_STORE);
    blocks.push(Block::Labelled {
        label: "FACTURÉ À:".into(),
        text: store_name.to_string(),
    });

    let clients = covered_clients(&invoice.interventions);
    if !clients.is_empty() {
        blocks.push(Block::Paragraph {
            title: Some("Clients concernés:".into()),
            lines: vec![clients.join(", ")],
        });
    }

    blocks.push(interventions_table(&invoice.interventions));

    let gross = invoice.gross_total;
    // Older records may lack the pre-tax figure; derive it from the
    // tax-included total at the assumed 20% rate.
    let net = invoice.net_total.unwrap_or(gross / VAT_FALLBACK_DIVISOR);
    let vat = gross - net;
    blocks.push(Block::TotalsBox(vec![
        ("Total HT:".into(), format_amount(net)),
        ("TVA (20%):".into(), format_amount(vat)),
        ("NET À PAYER:".into(), format_amount(gross)),
    ]));

    blocks.push(Block::Footer(footer_line(enterprise)));

    let filename = format!(
        "Facture_{}_{}.pdf",
        sanitize_filename_component(store_name),
        invoice.number
    );

    Ok(DocumentLayout { filename, blocks })
}

/// End clients covered by the invoice, deduplicated, first-seen order.
fn covered_clients(interventions: &[Intervention]) -> Vec<String> {
    let mut seen = Vec::new();
    for intervention in interventions {
        if let Some(name) = &intervention.client_name {
            if !name.is_empty() && !seen.contains(name) {
                seen.push(name.clone());
            }
        }
    }
    seen
}

/// Short human-readable reference derived from an intervention id.
fn short_ref(intervention: &Intervention) -> String {
    let simple = intervention.id.simple().to_string();
    format!("INT-{}", simple[..8].to_uppercase())
}

fn interventions_table(interventions: &[Intervention]) -> Block {
    let rows = interventions
        .iter()
        .map(|i| {
            vec![
                format_date(i.start_date),
                short_ref(i),
                i.client_name.clone().unwrap_or_else(|| "-".into()),
                i.device_name.clone().unwrap_or_else(|| "-".into()),
                or_dash(&i.reported_fault),
                format_amount(i.total),
            ]
        })
        .collect();
    Block::Table(Table {
        title: None,
        columns: vec![
            "Date".into(),
            "Réf".into(),
            "Client Final".into(),
            "Appareil".into(),
            "Panne / Note".into(),
            format!("Montant ({})", super::layout::CURRENCY),
        ],
        rows,
        footer: None,
    })
}

fn footer_line(enterprise: Option<&Enterprise>) -> String {
    if let Some(e) = enterprise {
        if let Some(address) = &e.address {
            let email = e.email.as_deref().unwrap_or("");
            return format!("{} - {} - {}", e.name, address, email);
        }
    }
    "Merci de votre confiance.".into()
}

fn or_dash(s: &str) -> String {
    if s.is_empty() { "-".into() } else { s.into() }
}
