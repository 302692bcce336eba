//! Declares a build against another stepscan release.

use stepscan::provider::{construct_default, ProviderDeclaration, ABI_VERSION};
use stepscan::{StepDefinition, StepProvider};

#[derive(Default)]
pub struct StaleSteps;

impl StepProvider for StaleSteps {
    fn steps(&self) -> Vec<StepDefinition> {
        vec![StepDefinition::given("an old provider build")]
    }
}

#[no_mangle]
#[allow(non_upper_case_globals)]
pub static stepscan_provider_declaration: ProviderDeclaration = ProviderDeclaration {
    abi_version: ABI_VERSION,
    core_version: "0.0.0-stale",
    qualified_name: "stale_core_steps::StaleSteps",
    markers: &["steps"],
    constructor: Some(construct_default::<StaleSteps>),
};
