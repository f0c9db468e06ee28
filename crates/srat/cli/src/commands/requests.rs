//! Request commands: submit, list, inspect and move requests along the chain

use crate::error::{CliError, CliResult};
use crate::output::{self, money, print_info, print_success, status_label, timestamp, OutputFormat};
use crate::session::Session;
use anyhow::Context;
use clap::Subcommand;
use srat_engine::{Action, ActionKind, RequestFilter};
use srat_storage::{AttachmentStore, Point, SignaturePad};
use srat_types::*;
use std::path::PathBuf;
use tabled::Tabled;

/// Request subcommands
#[derive(Subcommand)]
pub enum RequestCommands {
    /// Submit a new request (Field Staff)
    Submit {
        /// Funder name
        #[arg(short, long)]
        funder: String,

        /// Program name
        #[arg(short, long, default_value = "")]
        program: String,

        /// Overall notes
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Item as CATEGORY:AMOUNT[:key=value,...]; repeat for more items
        #[arg(short, long = "item", value_parser = parse_item, required = true)]
        items: Vec<DraftItem>,
    },

    /// List requests visible to you
    List {
        /// Only this funder
        #[arg(long)]
        funder: Option<String>,

        /// Only this status (e.g. "pending-pi", "paid")
        #[arg(long)]
        status: Option<RequestStatus>,

        /// Program name contains
        #[arg(long)]
        program: Option<String>,
    },

    /// Show one request with items, history and signatures
    Show {
        /// Request id or unique prefix
        request_id: String,
    },

    /// Actions you can take on a request
    Actions {
        /// Request id or unique prefix
        request_id: String,
    },

    /// Forward to the Coordinator (Facilitator)
    Forward {
        request_id: String,

        /// Fail if the request changed since this version
        #[arg(long)]
        expect_version: Option<u64>,
    },

    /// Approve at your step (Coordinator, PI or Admin)
    Approve {
        request_id: String,

        /// Approval letter text (PI step; generated when omitted)
        #[arg(short, long)]
        letter: Option<String>,

        #[arg(long)]
        expect_version: Option<u64>,
    },

    /// Record payment (Finance)
    Pay {
        request_id: String,

        /// Amount paid
        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(long)]
        expect_version: Option<u64>,
    },

    /// Reject at your step
    Reject {
        request_id: String,

        /// Reason for rejection
        #[arg(short, long)]
        reason: Option<String>,

        #[arg(long)]
        expect_version: Option<u64>,
    },

    /// Attach a file to a request
    Attach {
        request_id: String,

        /// File to attach
        file: PathBuf,
    },

    /// Sign a request with pen strokes
    Sign {
        request_id: String,

        /// Stroke as space-separated X,Y points; repeat for more strokes
        #[arg(short, long = "stroke", value_parser = parse_stroke, required = true)]
        strokes: Vec<StrokeArg>,
    },
}

/// One parsed `--stroke` argument
#[derive(Clone, Debug)]
pub struct StrokeArg(Vec<Point>);

/// Table row for request lists
#[derive(Tabled)]
struct RequestRow {
    id: String,
    date: String,
    requester: String,
    funder: String,
    program: String,
    total: String,
    status: String,
    version: u64,
}

impl From<&Request> for RequestRow {
    fn from(r: &Request) -> Self {
        Self {
            id: r.id.short().to_string(),
            date: timestamp(r.created_at),
            requester: r.created_by_name.clone(),
            funder: r.funder.clone(),
            program: r.program.clone(),
            total: money(r.total()),
            status: status_label(r.status),
            version: r.version,
        }
    }
}

#[derive(Tabled)]
struct ItemRow {
    category: String,
    amount: String,
    fields: String,
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        Self {
            category: item.category.clone(),
            amount: money(item.amount),
            fields: item
                .fields
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Tabled)]
struct HistoryRow {
    at: String,
    who: String,
    role: String,
    action: String,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(e: &HistoryEntry) -> Self {
        Self {
            at: timestamp(e.at),
            who: e.who.clone(),
            role: e.role.to_string(),
            action: e.action.clone(),
        }
    }
}

/// Parse `CATEGORY:AMOUNT[:key=value,...]`
fn parse_item(raw: &str) -> Result<DraftItem, String> {
    let mut parts = raw.splitn(3, ':');
    let category = parts.next().unwrap_or_default().trim();
    if category.is_empty() {
        return Err("item needs a category".into());
    }
    let amount = parts
        .next()
        .ok_or_else(|| format!("item '{raw}' needs an amount"))?
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("item '{raw}': bad amount: {e}"))?;

    let mut draft = DraftItem::new(category, amount);
    if let Some(fields) = parts.next() {
        for pair in fields.split(',').filter(|p| !p.trim().is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("field '{pair}' must be key=value"))?;
            draft = draft.with_field(key.trim(), value.trim());
        }
    }
    Ok(draft)
}

/// Parse `X,Y X,Y ...`
fn parse_stroke(raw: &str) -> Result<StrokeArg, String> {
    let points = raw
        .split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| format!("point '{pair}' must be X,Y"))?;
            let x = x.parse::<f32>().map_err(|e| format!("point '{pair}': {e}"))?;
            let y = y.parse::<f32>().map_err(|e| format!("point '{pair}': {e}"))?;
            let point = Point::new(x, y);
            if !point.is_finite() {
                return Err(format!("point '{pair}' must be finite"));
            }
            Ok(point)
        })
        .collect::<Result<Vec<_>, String>>()?;
    if points.is_empty() {
        return Err("stroke needs at least one point".into());
    }
    Ok(StrokeArg(points))
}

/// The approve variant that fits the actor at this request's step
fn approve_action(
    session: &Session,
    actor: &User,
    id: &RequestId,
    letter: Option<String>,
) -> CliResult<Action> {
    let allowed = session.desk().allowed_actions(actor, id)?;
    if allowed.contains(&ActionKind::CoordinatorApprove) || actor.role == Role::Coordinator {
        Ok(Action::CoordinatorApprove)
    } else {
        Ok(Action::PiApprove { letter })
    }
}

async fn transition(
    session: &mut Session,
    actor: &User,
    request_id: &str,
    expect_version: Option<u64>,
    action: impl FnOnce(&Session, &RequestId) -> CliResult<Action>,
    format: OutputFormat,
) -> CliResult<()> {
    let id = session.resolve(actor, request_id)?;
    let action = action(&*session, &id)?;
    let kind = action.kind();

    let updated = session
        .desk_mut()
        .act(&id, expect_version, actor, action)?;
    session.save().await?;

    match format {
        OutputFormat::Table => print_success(&format!(
            "{} {}: now {} (version {})",
            kind,
            updated.id.short(),
            updated.status,
            updated.version
        )),
        _ => output::print_single(&updated, format)?,
    }
    Ok(())
}

/// Execute a request command
pub async fn execute(
    command: RequestCommands,
    session: &mut Session,
    actor: &User,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        RequestCommands::Submit {
            funder,
            program,
            notes,
            items,
        } => {
            let meta = RequestMeta::new(funder, program).with_notes(notes);
            let request = session.desk_mut().submit(actor, items, meta)?;
            session.save().await?;

            match format {
                OutputFormat::Table => print_success(&format!(
                    "Submitted {} ({} items, total {})",
                    request.id,
                    request.item_count(),
                    money(request.total())
                )),
                _ => output::print_single(&request, format)?,
            }
            Ok(())
        }

        RequestCommands::List {
            funder,
            status,
            program,
        } => {
            let filter = RequestFilter {
                funder,
                status,
                program,
            };
            let requests = session.desk().visible_requests(actor, &filter);
            output::print_output(&requests, |r| RequestRow::from(*r), format)
        }

        RequestCommands::Show { request_id } => {
            let id = session.resolve(actor, &request_id)?;
            let request = session.desk().request_for(actor, &id)?;

            if !matches!(format, OutputFormat::Table) {
                return output::print_single(request, format);
            }

            println!("Request   {}", request.id);
            println!("Status    {}", status_label(request.status));
            println!("Requester {}", request.created_by_name);
            println!("Funder    {}", request.funder);
            println!("Program   {}", request.program);
            if !request.notes.is_empty() {
                println!("Notes     {}", request.notes);
            }
            println!("Total     {}", money(request.total()));
            if request.is_paid() {
                println!("Paid      {}", money(request.reimbursed));
            }
            println!("Version   {}", request.version);

            println!();
            output::print_output(&request.items, |i| ItemRow::from(i), format)?;
            println!();
            output::print_output(request.history.entries(), |e| HistoryRow::from(e), format)?;

            if !request.attachments.is_empty() {
                println!();
                for file in &request.attachments {
                    println!("Attachment {} ({} bytes, {})", file.name, file.size, file.digest);
                }
            }
            if !request.signatures.is_empty() {
                println!();
                for (signer, sig) in &request.signatures {
                    println!("Signed by {} at {}", signer, timestamp(sig.captured_at));
                }
            }
            if let Some(letter) = &request.approval_letter {
                println!();
                println!("{letter}");
            }
            Ok(())
        }

        RequestCommands::Actions { request_id } => {
            let id = session.resolve(actor, &request_id)?;
            let actions = session.desk().allowed_actions(actor, &id)?;
            if actions.is_empty() {
                print_info("No actions available to you on this request");
            } else {
                for action in actions {
                    println!("{action}");
                }
            }
            Ok(())
        }

        RequestCommands::Forward {
            request_id,
            expect_version,
        } => {
            transition(
                session,
                actor,
                &request_id,
                expect_version,
                |_, _| Ok(Action::Forward),
                format,
            )
            .await
        }

        RequestCommands::Approve {
            request_id,
            letter,
            expect_version,
        } => {
            transition(
                session,
                actor,
                &request_id,
                expect_version,
                |s, id| approve_action(s, actor, id, letter),
                format,
            )
            .await
        }

        RequestCommands::Pay {
            request_id,
            amount,
            expect_version,
        } => {
            transition(
                session,
                actor,
                &request_id,
                expect_version,
                |_, _| Ok(Action::MarkPaid { amount }),
                format,
            )
            .await
        }

        RequestCommands::Reject {
            request_id,
            reason,
            expect_version,
        } => {
            transition(
                session,
                actor,
                &request_id,
                expect_version,
                |_, _| Ok(Action::Reject { reason }),
                format,
            )
            .await
        }

        RequestCommands::Attach { request_id, file } => {
            let id = session.resolve(actor, &request_id)?;
            session.desk().request_for(actor, &id)?;

            let bytes = std::fs::read(&file)
                .with_context(|| format!("reading attachment {}", file.display()))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| CliError::InvalidInput(format!("{} is not a file", file.display())))?;

            let attachment = session.attachments().put(&name, bytes).await?;
            let updated = session.desk_mut().attach(&id, actor, attachment)?;
            session.save().await?;
            print_success(&format!(
                "Attached {} to {} ({} files)",
                name,
                updated.id.short(),
                updated.attachments.len()
            ));
            Ok(())
        }

        RequestCommands::Sign {
            request_id,
            strokes,
        } => {
            let id = session.resolve(actor, &request_id)?;
            let mut pad = SignaturePad::new();
            for StrokeArg(points) in strokes {
                pad.add_stroke(points);
            }
            let artifact = pad.capture()?;

            let updated = session.desk_mut().sign(&id, actor, artifact)?;
            session.save().await?;
            print_success(&format!(
                "Signature saved on {} as {}",
                updated.id.short(),
                actor.role
            ));
            Ok(())
        }
    }
}
