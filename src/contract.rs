//! Contract and function visitor (§4.1, §4.5's function-composition half):
//! the top-level driver that turns a whole [`ContractInput`] into the
//! final source text, plus per-function signature/body composition.

use crate::config::ConverterConfig;
use crate::context::Converter;
use crate::error::ConvertError;
use crate::funcs::FunctionRecord;
use crate::input::{resolve_type, ContractInput, FunctionInput};
use crate::mutability::Mutability;
use crate::stmt::lower_block;
use crate::types::Type;

/// Storage decls (bounded, blank line if any were emitted), then functions
/// (bounded). Both lists are silently truncated beyond their configured
/// cap — the emitted count is `min(inputs, bound)`.
pub fn lower_contract(cx: &mut Converter, contract: &ContractInput, config: &ConverterConfig) -> Result<String, ConvertError> {
    let mut out = String::new();
    let mut emitted_any_decl = false;
    for node in contract.decls.iter().take(config.max_storage_variables) {
        let ty = resolve_type(node);
        let id = cx.vars.next_id(&ty);
        let name = format!("x_{}_{id}", ty.tag());
        cx.vars.register_global(name.clone(), ty.clone());
        out.push_str(&format!("{name}: {}\n", ty.render()));
        emitted_any_decl = true;
    }
    if emitted_any_decl {
        out.push('\n');
    }
    for func in contract.functions.iter().take(config.max_functions) {
        out.push_str(&lower_function(cx, func)?);
        out.push('\n');
    }
    Ok(out)
}

fn render_outputs(outputs: &[Type]) -> String {
    match outputs.len() {
        0 => String::new(),
        1 => format!(" -> {}", outputs[0].render()),
        _ => format!(" -> ({})", outputs.iter().map(Type::render).collect::<Vec<_>>().join(", ")),
    }
}

/// Reset mutability to `Pure`, clamp it to at least the input's declared
/// mutability, lower params/outputs/body, then compose the signature.
/// Mutability is read *after* the body lowers, so escalations observed
/// while lowering statements are reflected in the emitted annotation.
fn lower_function(cx: &mut Converter, func: &FunctionInput) -> Result<String, ConvertError> {
    cx.mutability = Mutability::Pure;
    cx.escalate(func.declared_mutability);

    let mut params = Vec::with_capacity(func.inputs.len());
    let mut input_types = Vec::with_capacity(func.inputs.len());
    for node in &func.inputs {
        let ty = resolve_type(node);
        let id = cx.vars.next_id(&ty);
        let name = format!("x_{}_{id}", ty.tag());
        cx.vars.register_function(name.clone(), 1, ty.clone());
        params.push(format!("{name}: {}", ty.render()));
        input_types.push(ty);
    }
    let outputs: Vec<Type> = func.outputs.iter().map(resolve_type).collect();

    let name = cx.funcs.next_name();
    cx.block_level = 1;
    let body = lower_block(cx, &func.body, 1, &outputs);
    cx.vars.exit_to(0);
    cx.block_level = 0;
    let body = body?;

    cx.funcs.register(FunctionRecord {
        name: name.clone(),
        mutability: cx.mutability,
        visibility: func.visibility,
        inputs: input_types,
        outputs: outputs.clone(),
    });

    let mut lines = vec![func.visibility.annotation().to_string()];
    if let Some(key) = &func.reentrancy_key {
        if cx.mutability > Mutability::Pure {
            lines.push(format!("@nonreentrant(\"{key}\")"));
        }
    }
    lines.push(cx.mutability.annotation().to_string());
    lines.push(format!("def {name}({}){}:", params.join(", "), render_outputs(&outputs)));
    lines.push(body);
    Ok(lines.join("\n"))
}
