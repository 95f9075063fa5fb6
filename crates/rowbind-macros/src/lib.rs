extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derives `rowbind::Bindable`, mapping every named field to the column of
/// the same name with inferred nullability (the same rule as a plain `map`
/// call: absence allowed only for string and `Option`-wrapped fields).
#[proc_macro_derive(Bindable)]
pub fn derive_bindable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "Bindable can only be derived for structs",
        ));
    };

    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            ident,
            "Bindable requires named fields",
        ));
    };

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Bindable cannot be derived for generic structs",
        ));
    }

    let maps = fields.named.iter().map(|field| {
        let name = field.ident.as_ref().unwrap();
        quote! {
            definition.map(::rowbind::field!(#ident, #name))?;
        }
    });

    Ok(quote! {
        impl ::rowbind::Bindable for #ident {
            fn bind(definition: &mut ::rowbind::MappingDefinition<Self>) -> ::rowbind::Result<()> {
                #( #maps )*
                Ok(())
            }
        }
    })
}
