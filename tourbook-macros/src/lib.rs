//! Procedural macros for the tourbook backend
//!
//! - `paginated_response!` - Generate the `{ data, pagination }` envelope for a list query

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse::Parse, parse::ParseStream, parse_macro_input, Ident, Token, Type};

/// Generate a paginated GraphQL/JSON envelope for an entity type.
///
/// # Usage
///
/// ```ignore
/// paginated_response!(RoutePage, Route);
/// ```
///
/// # Generated Code
///
/// ```ignore
/// #[derive(Debug, Clone, async_graphql::SimpleObject, serde::Serialize)]
/// pub struct RoutePage {
///     pub data: Vec<Route>,
///     pub pagination: crate::orm::PaginationMeta,
/// }
///
/// impl From<crate::orm::Paginated<Route>> for RoutePage { ... }
/// ```
#[proc_macro]
pub fn paginated_response(input: TokenStream) -> TokenStream {
    let parsed = parse_macro_input!(input as PaginatedResponseInput);

    let struct_name = &parsed.name;
    let item_type = &parsed.item;
    let doc = format!(
        "A page of `{}` records together with its page metadata",
        quote!(#item_type)
    );

    let output = quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, async_graphql::SimpleObject, serde::Serialize)]
        pub struct #struct_name {
            pub data: Vec<#item_type>,
            pub pagination: crate::orm::PaginationMeta,
        }

        impl From<crate::orm::Paginated<#item_type>> for #struct_name {
            fn from(page: crate::orm::Paginated<#item_type>) -> Self {
                Self {
                    data: page.data,
                    pagination: page.pagination,
                }
            }
        }
    };
    output.into()
}

struct PaginatedResponseInput {
    name: Ident,
    item: Type,
}

impl Parse for PaginatedResponseInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![,]>()?;
        let item: Type = input.parse()?;
        // Allow a trailing comma
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        Ok(Self { name, item })
    }
}
