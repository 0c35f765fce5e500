use serde::{Deserialize, Serialize};
use sheetnest::io::ext_repr::{ExtInstance, ExtSolution};

use crate::config::SFFConfig;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SFFOutput {
    #[serde(flatten)]
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub config: SFFConfig,
    /// Factor by which the pieces were rescaled before packing
    pub scale_factor: f64,
}
