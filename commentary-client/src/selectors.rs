use crate::{api::Comment, CommentsState};

/// Currently cached comments, `None` until the first successful load
pub fn get_comments(state: &CommentsState) -> Option<&[Comment]> {
    state.entities.as_deref()
}

pub fn get_comments_loading_status(state: &CommentsState) -> bool {
    state.is_loading
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::loaded;

    #[test]
    fn project_state() {
        let s = CommentsState::default();
        assert_eq!(get_comments(&s), None);
        assert!(get_comments_loading_status(&s));

        let s = loaded(&["a"]);
        assert_eq!(get_comments(&s).map(|c| c.len()), Some(1));
        assert!(!get_comments_loading_status(&s));
    }
}
