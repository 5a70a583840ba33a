use axum::{extract::Path, Json};

use crate::dtos::{LanguagesResponse, TranslationsResponse};
use crate::i18n::Catalog;

pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: Catalog::global().supported_languages(),
    })
}

/// Unknown codes resolve to English rather than 404.
pub async fn get_translations(Path(code): Path<String>) -> Json<TranslationsResponse> {
    let language = Catalog::global().language(&code);

    Json(TranslationsResponse {
        code: language.code,
        translations: language.entries(),
    })
}
