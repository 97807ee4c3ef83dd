mod http;
pub use http::HttpCommentService;

mod ops;
pub use ops::{create_comment, load_comments_list, remove_comment, Removal};

mod selectors;
pub use selectors::{get_comments, get_comments_loading_status};

mod state;
pub use state::{CommentsAction, CommentsState, StoreError};

mod store;
pub use store::Store;

pub mod api {
    pub use commentary_api::*;
}
