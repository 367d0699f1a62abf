//! Prepare a quote for one product.

use anyhow::{bail, Context as _, Result};
use chrono::Utc;
use dialoguer::Input;
use storefront_commerce::quote::BuyerContact;
use storefront_commerce::ProductId;

use super::QuoteArgs;
use crate::context::Context;

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront()?;
    let id = ProductId::new(args.product.clone());
    // Fail on an unknown product before asking for contact details.
    let product = store.product(&id)?;
    if !product.is_available() {
        ctx.output.warn(&format!(
            "{} is {}; the quote may not be honored",
            product.name,
            product.status.as_str()
        ));
    }

    let interactive = !args.no_input && !ctx.output.is_json();
    let buyer = collect_contact(&args, interactive)?;

    let quote = store.quote(&id, args.quantity, buyer, Utc::now())?;

    if let Some(path) = &args.output {
        let path = ctx.cwd.join(path);
        let json = serde_json::to_string_pretty(&quote)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write quote: {}", path.display()))?;
        ctx.output.success(&format!("Quote saved to {}", path.display()));
    }

    if ctx.output.is_json() {
        ctx.output.json(&quote);
        return Ok(());
    }

    ctx.output.header("Quote");
    for line in quote.summary_lines() {
        ctx.output.list_item(&line);
    }

    Ok(())
}

/// Fill the buyer contact from flags, prompting for missing required fields.
fn collect_contact(args: &QuoteArgs, interactive: bool) -> Result<BuyerContact> {
    let mut contact = BuyerContact {
        company: args.company.clone().unwrap_or_default(),
        email: args.email.clone().unwrap_or_default(),
        phone: args.phone.clone().unwrap_or_default(),
        address: args.address.clone().filter(|a| !a.trim().is_empty()),
    };

    if contact.is_complete() {
        return Ok(contact);
    }
    if !interactive {
        bail!("Company, email and phone are required (use --company, --email, --phone)");
    }

    for (prompt, field) in [
        ("Company name", &mut contact.company),
        ("Email", &mut contact.email),
        ("Phone", &mut contact.phone),
    ] {
        if field.trim().is_empty() {
            *field = Input::<String>::new().with_prompt(prompt).interact_text()?;
        }
    }

    if contact.address.is_none() {
        let address: String = Input::new()
            .with_prompt("Address (optional)")
            .allow_empty(true)
            .interact_text()?;
        contact.address = Some(address).filter(|a| !a.trim().is_empty());
    }

    Ok(contact)
}
