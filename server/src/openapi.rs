use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(), components(), tags())]
pub struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info = crate::openapi_info();

    doc.merge(crate::endpoints::ApiDoc::openapi());
    doc.merge(vocero_module_assistant::assistant::endpoints::ApiDoc::openapi());
    doc.merge(vocero_module_assistant::file::endpoints::ApiDoc::openapi());
    doc.merge(vocero_module_assistant::tool::endpoints::ApiDoc::openapi());
    doc.merge(vocero_module_assistant::call::endpoints::ApiDoc::openapi());
    doc.merge(vocero_module_assistant::embed::endpoints::ApiDoc::openapi());
    doc.merge(vocero_module_scrape::endpoints::ApiDoc::openapi());

    doc
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn generate_openapi() {
        let doc = openapi();

        assert!(doc.paths.paths.contains_key("/api/v1/assistant"));
        assert!(doc.paths.paths.contains_key("/api/v1/scrape"));
        assert!(doc
            .paths
            .paths
            .contains_key("/api/v1/widget/{embed_id}/config"));
    }
}
