use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Derive macro for the user-type name table.
///
/// Generates `impl cnv_api::value::NamedValues` for a fieldless enum:
///
/// - `NAMES` — text of every variant, in declaration order.
/// - `VALUES` — the variants themselves, in the same order.
///
/// The default name is the variant identifier in lowercase. Override it with
/// `#[cnv(name = "...")]`. The enum must be `Copy + PartialEq`.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Copy, PartialEq, NamedValues)]
/// pub enum Change {
///     No,
///     Up,
///     #[cnv(name = "dn")]
///     Down,
/// }
/// ```
#[proc_macro_derive(NamedValues, attributes(cnv))]
pub fn derive_named_values(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "NamedValues does not support generic enums",
        ));
    }

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "NamedValues only supports enums",
            ))
        }
    };

    if variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "NamedValues needs at least one variant",
        ));
    }

    let mut names: Vec<String> = Vec::new();
    let mut value_tokens = Vec::new();

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "NamedValues only supports unit variants",
            ));
        }
        let ident = &variant.ident;

        // Parse #[cnv(...)] attribute.
        let mut rename: Option<String> = None;
        for attr in &variant.attrs {
            if !attr.path().is_ident("cnv") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown cnv attribute (expected `name`)"))
                }
            })?;
        }

        let text = rename.unwrap_or_else(|| ident.to_string().to_lowercase());
        if text.is_empty() {
            return Err(syn::Error::new_spanned(ident, "variant name must not be empty"));
        }
        if names.contains(&text) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate name '{text}'"),
            ));
        }
        names.push(text);
        value_tokens.push(quote! { #name::#ident });
    }

    let expanded = quote! {
        impl ::cnv_api::value::NamedValues for #name {
            const NAMES: &'static [&'static str] = &[#(#names),*];
            const VALUES: &'static [Self] = &[#(#value_tokens),*];
        }
    };

    Ok(TokenStream::from(expanded))
}
