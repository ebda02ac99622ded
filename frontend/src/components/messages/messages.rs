use common::error::FetchError;
use common::model::template::Template;
use common::templates::SubmitOutcome;

pub enum Msg {
    TemplatesLoaded(Result<Vec<Template>, FetchError>),
    SelectTab(usize),
    EditField {
        uuid: String,
        field_type: String,
        input: String,
    },
    Cancel,
    Save,
    SaveFinished(SubmitOutcome),
}
