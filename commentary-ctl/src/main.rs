use anyhow::{anyhow, Context};
use commentary_client::{
    api::{Comment, CommentId, NewComment, PageId, Payload, UserId},
    get_comments, HttpCommentService, Removal, Store,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Base url of the comment service
    #[structopt(short, long)]
    host: reqwest::Url,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// List the comments on a user's page
    List {
        /// User whose page to list
        user: String,
    },

    /// Post a comment
    Create {
        /// Page to attach the comment to
        page: String,

        /// Author of the comment
        user: String,

        /// Extra field, as key=value (repeatable)
        #[structopt(short, long = "field")]
        fields: Vec<String>,

        /// Extra fields, as a json object
        #[structopt(long)]
        json: Option<String>,
    },

    /// Remove a comment
    Remove {
        /// Id of the comment
        id: String,
    },
}

fn service_token() -> anyhow::Result<Option<String>> {
    match std::env::var("COMMENTARY_TOKEN") {
        Ok(tok) => Ok(Some(tok)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).context("retrieving COMMENTARY_TOKEN environment variable"),
    }
}

fn parse_payload(fields: Vec<String>, json: Option<String>) -> anyhow::Result<Payload> {
    let mut payload = match json {
        None => Payload::new(),
        Some(json) => match serde_json::from_str(&json).context("parsing --json")? {
            serde_json::Value::Object(m) => m,
            _ => return Err(anyhow!("--json must be a json object")),
        },
    };
    for f in fields {
        let (key, value) = f
            .split_once('=')
            .ok_or_else(|| anyhow!("field {f:?} is not of the form key=value"))?;
        payload.insert(String::from(key), serde_json::Value::from(value));
    }
    Ok(payload)
}

fn print_comment(c: &Comment) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string(c).context("serializing comment")?
    );
    Ok(())
}

/// The copy the service returned for the comment just created, if it was
fn created_comment(store: &Store) -> Option<Comment> {
    store.select(|s| match s.error {
        Some(_) => None,
        None => get_comments(s).and_then(|l| l.last().cloned()),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let mut service = HttpCommentService::new(opt.host);
    if let Some(tok) = service_token()? {
        service = service.with_token(tok);
    }
    let store = Store::new();

    match opt.cmd {
        Command::List { user } => {
            commentary_client::load_comments_list(&store, &service, &UserId(user)).await?;
            for c in store.select(|s| s.entities.clone()).unwrap_or_default() {
                print_comment(&c)?;
            }
        }
        Command::Create {
            page,
            user,
            fields,
            json,
        } => {
            let comment = NewComment {
                payload: parse_payload(fields, json)?,
                page_id: PageId(page.clone()),
                current_user_id: UserId(user),
            };
            // new comments can only be appended to an already loaded page
            commentary_client::load_comments_list(&store, &service, &UserId(page)).await?;
            if store.snapshot().entities.is_none() {
                return Err(anyhow!("failed to load the page before commenting"));
            }
            commentary_client::create_comment(&store, &service, comment).await?;
            if let Some(c) = created_comment(&store) {
                print_comment(&c)?;
            }
        }
        Command::Remove { id } => {
            let id = CommentId(id);
            match commentary_client::remove_comment(&store, &service, &id).await? {
                Removal::Deleted => println!("removed {id}"),
                Removal::Retained(content) => {
                    println!("service kept {id}, answering {content}")
                }
                Removal::Failed => (),
            }
        }
    }

    match store.snapshot().error {
        Some(err) => Err(anyhow!(err)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use commentary_client::{CommentsAction, CommentsState};

    use super::*;

    #[test]
    fn payload_from_fields_and_json() {
        let p = parse_payload(
            vec![String::from("content=hi=there")],
            Some(String::from(r#"{"rating": 5, "content": "overridden"}"#)),
        )
        .unwrap();
        assert_eq!(p.get("content"), Some(&serde_json::json!("hi=there")));
        assert_eq!(p.get("rating"), Some(&serde_json::json!(5)));
    }

    #[test]
    fn payload_errors() {
        assert!(parse_payload(vec![String::from("nokey")], None).is_err());
        assert!(parse_payload(Vec::new(), Some(String::from("[1]"))).is_err());
        assert!(parse_payload(Vec::new(), Some(String::from("{"))).is_err());
    }

    fn comment(text: &str) -> Comment {
        let mut payload = Payload::new();
        payload.insert(String::from("content"), serde_json::json!(text));
        NewComment {
            payload,
            page_id: PageId::from("page"),
            current_user_id: UserId::from("alice"),
        }
        .build(chrono::Utc::now())
    }

    #[test]
    fn created_comment_is_the_last_one() {
        let (old, new) = (comment("old"), comment("new"));
        let store = Store::with_state(CommentsState {
            entities: Some(vec![old]),
            is_loading: false,
            error: None,
        });
        store
            .dispatch(CommentsAction::CommentCreatedSuccessfully(new.clone()))
            .unwrap();
        assert_eq!(created_comment(&store), Some(new));
    }

    #[test]
    fn nothing_created_on_failure() {
        let store = Store::with_state(CommentsState {
            entities: Some(vec![comment("old")]),
            is_loading: false,
            error: None,
        });
        store
            .dispatch(CommentsAction::CommentCreationFailed(String::from("nope")))
            .unwrap();
        assert_eq!(created_comment(&store), None);
    }
}
