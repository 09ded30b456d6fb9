//! Tickbench Macros
//!
//! Procedural macro for benchmark registration.
//!
//! `#[bench]` registers a `fn(&mut State)` as a benchmark entry at program
//! initialization and marks it `#[inline(never)]` so the call site forms a
//! reliable optimization boundary around the measurement loop.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

mod attr {
    use syn::meta::ParseNestedMeta;

    /// Get the attribute name as a string
    pub fn name(meta: &ParseNestedMeta) -> String {
        meta.path
            .get_ident()
            .map(|i| i.to_string())
            .unwrap_or_default()
    }

    /// Parse a string literal attribute: `attr = "value"`
    pub fn string(meta: &ParseNestedMeta) -> syn::Result<String> {
        let value: syn::LitStr = meta.value()?.parse()?;
        Ok(value.value())
    }

    /// Parse a bracketed array of expressions: `attr = [expr, expr]`
    pub fn expr_array(meta: &ParseNestedMeta) -> syn::Result<Vec<syn::Expr>> {
        meta.value()?;
        let content;
        syn::bracketed!(content in meta.input);
        let items: syn::punctuated::Punctuated<syn::Expr, syn::Token![,]> =
            syn::punctuated::Punctuated::parse_terminated(&content)?;
        Ok(items.into_iter().collect())
    }

    /// Create an unknown attribute error
    pub fn unknown(meta: &ParseNestedMeta, name: &str) -> syn::Error {
        meta.error(format!("unknown attribute: {}", name))
    }
}

/// Register a benchmark function
///
/// # Example
///
/// ```ignore
/// #[tickbench::bench]
/// fn add_numbers(state: &mut State) {
///     state.iter(|| 42u64 + 17);
/// }
///
/// // With argument axes; axis 0 varies fastest in the sweep.
/// #[tickbench::bench(args = [log_range(1024, 65536, 4.0)])]
/// fn copy_bytes(state: &mut State) {
///     let n = state.arg(0) as usize;
///     // ...
/// }
///
/// // With a custom display name
/// #[tickbench::bench(name = "memcpy/8k")]
/// fn copy_8k(state: &mut State) { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn bench(args: TokenStream, item: TokenStream) -> TokenStream {
    let args = TokenStream2::from(args);
    let func = parse_macro_input!(item as ItemFn);

    bench_impl(args, func)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn bench_impl(args: TokenStream2, func: ItemFn) -> Result<TokenStream2, syn::Error> {
    validate_signature(&func)?;

    let mut display_name: Option<String> = None;
    let mut axes: Vec<syn::Expr> = Vec::new();

    if !args.is_empty() {
        let parser = syn::meta::parser(|meta| {
            let name = attr::name(&meta);
            match name.as_str() {
                "name" => display_name = Some(attr::string(&meta)?),
                "args" => axes = attr::expr_array(&meta)?,
                _ => return Err(attr::unknown(&meta, &name)),
            }
            Ok(())
        });
        syn::parse::Parser::parse2(parser, args)?;
    }

    let fn_name = &func.sig.ident;
    let display = display_name.unwrap_or_else(|| fn_name.to_string());
    let axis_exprs = &axes;

    Ok(quote! {
        #[inline(never)]
        #func

        ::tickbench::internal::inventory::submit! {
            ::tickbench::Entry {
                name: #display,
                func: #fn_name,
                axes: ::std::vec![#(#axis_exprs),*],
            }
        }
    })
}

fn validate_signature(func: &ItemFn) -> syn::Result<()> {
    if func.sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &func.sig,
            "tickbench: benchmark must take exactly one argument: `&mut State`",
        ));
    }
    if func.sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            &func.sig,
            "tickbench: benchmark functions cannot be async",
        ));
    }
    Ok(())
}
