//! Template commands

use crate::error::CliResult;
use crate::output::{self, print_info, print_success, OutputFormat};
use crate::session::Session;
use clap::Subcommand;
use serde::Serialize;
use srat_types::{FieldDescriptor, FieldType, User};
use tabled::Tabled;

/// Template subcommands
#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List template fields, optionally for one category
    List {
        /// Category name
        category: Option<String>,
    },

    /// Add a field to a category, or replace the field with the same key (Admin)
    AddField {
        /// Category name (created if new)
        category: String,

        /// Field key
        key: String,

        /// Display label (defaults to the key)
        #[arg(short, long)]
        label: Option<String>,

        /// Field type (text, number, date, textarea)
        #[arg(short = 't', long = "type", default_value = "text")]
        field_type: FieldType,
    },

    /// Replace a category's whole field list (Admin)
    Set {
        /// Category name (created if new)
        category: String,

        /// Field as KEY[:LABEL[:TYPE]], in display order (repeatable)
        #[arg(short, long = "field", value_parser = parse_field, required = true)]
        fields: Vec<FieldDescriptor>,
    },

    /// Remove a field from a category (Admin)
    RemoveField {
        /// Category name
        category: String,

        /// Field key
        key: String,
    },
}

/// One field of one category
#[derive(Serialize)]
struct TemplateField<'a> {
    category: &'a str,
    #[serde(flatten)]
    field: &'a FieldDescriptor,
}

#[derive(Tabled)]
struct TemplateRow {
    category: String,
    key: String,
    label: String,
    #[tabled(rename = "type")]
    field_type: String,
}

impl From<&TemplateField<'_>> for TemplateRow {
    fn from(t: &TemplateField<'_>) -> Self {
        Self {
            category: t.category.to_string(),
            key: t.field.key.clone(),
            label: t.field.label.clone(),
            field_type: t.field.field_type.to_string(),
        }
    }
}

/// Parse `KEY[:LABEL[:TYPE]]`; the label defaults to the key, the type to text
fn parse_field(raw: &str) -> Result<FieldDescriptor, String> {
    let mut parts = raw.splitn(3, ':').map(str::trim);
    let key = parts.next().unwrap_or_default();
    if key.is_empty() {
        return Err(format!("field '{raw}' needs a key"));
    }
    let label = parts.next().filter(|l| !l.is_empty()).unwrap_or(key);
    let field_type = match parts.next() {
        Some(t) => t.parse::<FieldType>().map_err(|e| e.to_string())?,
        None => FieldType::Text,
    };
    Ok(FieldDescriptor::new(key, label, field_type))
}

/// Execute a template command
pub async fn execute(
    command: TemplateCommands,
    session: &mut Session,
    actor: &User,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        TemplateCommands::List { category } => {
            let templates = session.desk().templates();
            let fields: Vec<TemplateField<'_>> = templates
                .categories()
                .filter(|c| category.as_deref().map_or(true, |wanted| wanted == *c))
                .flat_map(|c| {
                    templates
                        .get_fields(c)
                        .iter()
                        .map(move |field| TemplateField { category: c, field })
                })
                .collect();
            output::print_output(&fields, |t| TemplateRow::from(t), format)
        }

        TemplateCommands::AddField {
            category,
            key,
            label,
            field_type,
        } => {
            let label = label.unwrap_or_else(|| key.clone());
            let field = FieldDescriptor::new(key.clone(), label, field_type);
            session
                .desk_mut()
                .add_template_field(actor, &category, field)?;
            session.save().await?;
            print_success(&format!("Saved field {key} ({field_type}) on {category}"));
            Ok(())
        }

        TemplateCommands::Set { category, fields } => {
            let count = fields.len();
            session
                .desk_mut()
                .set_template_fields(actor, &category, fields)?;
            session.save().await?;
            print_success(&format!("Saved {count} fields on {category}"));
            Ok(())
        }

        TemplateCommands::RemoveField { category, key } => {
            let removed = session
                .desk_mut()
                .remove_template_field(actor, &category, &key)?;
            match removed {
                Some(_) => {
                    session.save().await?;
                    print_success(&format!("Removed field {key} from {category}"));
                }
                None => print_info(&format!("{category} has no field {key}")),
            }
            Ok(())
        }
    }
}
