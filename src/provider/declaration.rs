//! Layout shared between the engine and step provider shared libraries.

use super::Constructor;

/// Bumped whenever [`ProviderDeclaration`] changes shape.
pub const ABI_VERSION: u32 = 1;

pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the static every provider library exports.
pub const DECLARATION_SYMBOL: &str = "stepscan_provider_declaration";

/// Exported by a provider library under [`DECLARATION_SYMBOL`].
///
/// `abi_version` stays the first field so a host can reject libraries built
/// against another layout before touching anything else.
#[repr(C)]
pub struct ProviderDeclaration {
    pub abi_version: u32,
    pub core_version: &'static str,
    pub qualified_name: &'static str,
    pub markers: &'static [&'static str],
    pub constructor: Option<Constructor>,
}

impl ProviderDeclaration {
    pub(crate) fn symbol_name() -> Vec<u8> {
        let mut name = DECLARATION_SYMBOL.as_bytes().to_vec();
        name.push(0);
        name
    }
}

/// Exports a provider declaration from a `cdylib`.
///
/// As with `register_step_provider!`, the type is named bare from the module
/// that defines it, so the declared name is its real path.
///
/// ```ignore
/// #[derive(Default)]
/// pub struct CheckoutSteps;
///
/// impl stepscan::StepProvider for CheckoutSteps { /* ... */ }
///
/// stepscan::export_step_provider!(CheckoutSteps);
/// ```
///
/// The long form sets the markers and the constructor explicitly:
///
/// ```ignore
/// stepscan::export_step_provider!(
///     CheckoutSteps,
///     markers = ["steps", "slow"],
///     constructor = Some(CheckoutSteps::connect),
/// );
/// ```
#[macro_export]
macro_rules! export_step_provider {
    ($ty:ident $(,)?) => {
        $crate::export_step_provider!(
            $ty,
            markers = [$crate::discovery::STEPS_MARKER],
            constructor = Some($crate::provider::construct_default::<$ty>),
        );
    };
    ($ty:ident, markers = [$($marker:expr),* $(,)?], constructor = $ctor:expr $(,)?) => {
        #[no_mangle]
        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        pub static stepscan_provider_declaration: $crate::provider::ProviderDeclaration =
            $crate::provider::ProviderDeclaration {
                abi_version: $crate::provider::ABI_VERSION,
                core_version: $crate::provider::CORE_VERSION,
                qualified_name: concat!(module_path!(), "::", stringify!($ty)),
                markers: &[$($marker),*],
                constructor: $ctor,
            };
    };
}
