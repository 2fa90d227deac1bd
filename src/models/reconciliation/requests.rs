use serde::Deserialize;
use ts_rs::TS;

// Execução de reconciliação em lote
//
// dry_run = true (padrão) apenas relata o que mudaria, sem escrever nada,
// espelhando a separação dry-run/execução dos scripts de manutenção.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/reconciliation.ts")]
pub struct ReconcileRequest {
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
    // ausente = todas as turmas, em ordem de id
    pub classes: Option<Vec<String>>,
    // ausente = todos os alunos, em ordem de id
    pub students: Option<Vec<String>>,
}

fn default_dry_run() -> bool {
    true
}

impl Default for ReconcileRequest {
    fn default() -> Self {
        Self {
            dry_run: true,
            classes: None,
            students: None,
        }
    }
}
