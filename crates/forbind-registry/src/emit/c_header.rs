use forbind_core::{ElementKind, MAX_RANK, Signature};

use super::CodeWriter;
use crate::options::EmitOptions;
use crate::registry::Registry;

fn prelude(w: &mut CodeWriter) {
    w.line("typedef struct gen_handle gen_handle;");
    w.blank();
    w.line("typedef enum gen_fortran_array_kind {");
    for kind in ElementKind::ALL {
        w.line(format!("    {} = {},", kind.c_enumerator(), kind.tag()));
    }
    w.line("} gen_fortran_array_kind;");
    w.blank();
    w.line("typedef struct gen_fortran_array_descriptor {");
    w.line("    gen_fortran_array_kind type;");
    w.line("    int rank;");
    w.line(format!("    int dims[{MAX_RANK}];"));
    w.line("    bool is_acc_present;");
    w.line("    void *data;");
    w.line("} gen_fortran_array_descriptor;");
    w.blank();
    w.line("const char *gen_last_error(void);");
    w.blank();
}

/// The C declaration of one exported function, without newline.
pub(crate) fn declaration(name: &str, signature: &Signature) -> String {
    let params = if signature.params.is_empty() {
        "void".to_string()
    } else {
        signature
            .params
            .iter()
            .map(|param| param.foreign.c_name())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("{} {}({});", signature.result.c_name(), name, params)
}

/// Emit the C header declaring every registered entity.
pub fn c_header(registry: &Registry, options: &EmitOptions) -> String {
    let mut w = CodeWriter::new();
    w.line(format!("// {}", options.banner));
    w.line("#pragma once");
    w.blank();
    w.line("#include <stdbool.h>");
    for include in &options.includes {
        w.line(format!("#include <{include}>"));
    }
    w.blank();
    w.line("#ifdef __cplusplus");
    w.line("extern \"C\" {");
    w.line("#endif");
    w.blank();
    if options.inline_prelude {
        prelude(&mut w);
    }
    for entity in registry.sorted() {
        log::trace!("c header: {}", entity.name);
        w.line(declaration(&entity.name, &entity.signature));
    }
    w.blank();
    w.line("#ifdef __cplusplus");
    w.line("}");
    w.line("#endif");
    w.finish()
}
