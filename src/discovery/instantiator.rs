use std::any::Any;
use std::panic;

use super::symbol::LoadedSymbol;
use crate::error::InstantiationError;
use crate::provider::ProviderInstance;

/// Runs the zero-argument constructor of a symbol that passed the capability
/// filter.
///
/// A panicking constructor is reported as
/// [`InstantiationError::ConstructorPanicked`] instead of unwinding into the
/// resolution pass.
pub fn instantiate(symbol: &LoadedSymbol) -> Result<ProviderInstance, InstantiationError> {
    let name = symbol.qualified_name();
    let constructor = symbol
        .constructor()
        .ok_or_else(|| InstantiationError::no_constructor(name))?;

    match panic::catch_unwind(constructor) {
        Ok(Ok(provider)) => Ok(ProviderInstance::new(
            name,
            provider,
            symbol.library().cloned(),
        )),
        Ok(Err(message)) => Err(InstantiationError::constructor_failed(name, message)),
        Err(payload) => Err(InstantiationError::constructor_panicked(
            name,
            panic_message(payload.as_ref()),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
