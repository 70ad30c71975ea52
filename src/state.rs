use std::sync::Arc;

use crate::{
    auth::{TokenValidator, oauth::TokenIssuer},
    service::NoteService,
};

#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<NoteService>,
    pub validator: Arc<dyn TokenValidator>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(
        notes: Arc<NoteService>,
        validator: Arc<dyn TokenValidator>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            notes,
            validator,
            tokens: Arc::new(tokens),
        }
    }
}
