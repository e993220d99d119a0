use crate::backend::BackendClient;
use crate::charts::SvgChartService;

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub charts: SvgChartService,
}

impl AppState {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            charts: SvgChartService,
        }
    }
}
