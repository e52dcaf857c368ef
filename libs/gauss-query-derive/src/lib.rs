use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive macro for query-decodable records.
///
/// Implements `gauss_query::QueryField` and `gauss_query::QueryRecord` on the
/// annotated struct:
///
/// - `schema() -> &'static Schema`: field descriptors, built once and cached.
/// - `from_value(Value, &str) -> Result<Self, DecodeError>`: assembles the
///   struct from a hydrated record.
///
/// Every field type must implement `QueryField`, except ignored fields,
/// which only need `Default`.
///
/// # Example
///
/// ```ignore
/// #[derive(QueryRecord)]
/// pub struct Search {
///     #[query(name = "q", required)]
///     pub query: String,
///
///     #[query(default = "20")]
///     pub limit: u32,
///
///     #[query(format = "%Y-%m-%d")]
///     pub since: Option<DateTime<Utc>>,
///
///     #[query(skip)]
///     pub internal: u64,
/// }
/// ```
///
/// Field attributes (`#[query(...)]`):
/// - `name = "..."`: parameter key, `"-"` ignores the field.
/// - `skip`: same as `name = "-"`.
/// - `default = "..."`: literal used when the key is absent.
/// - `required` / `validate = "required,..."`: fail when the field ends unset.
/// - `format = "..."`: chrono format for timestamp fields.
#[proc_macro_derive(QueryRecord, attributes(query))]
pub fn derive_query_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let name_str = name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "QueryRecord only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(name, "QueryRecord only supports structs"));
        }
    };

    // The schema lives in one static per impl, which monomorphizations would share.
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "QueryRecord does not support generic structs",
        ));
    }

    let mut descriptor_tokens = Vec::new();
    let mut init_tokens = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let field_name_str = field_name.to_string();
        let field_ty = &field.ty;

        // Parse #[query(...)] attributes.
        let mut alias: Option<String> = None;
        let mut default_str: Option<String> = None;
        let mut validate_str: Option<String> = None;
        let mut format_str: Option<String> = None;
        let mut required = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("query") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    alias = Some(value.value());
                } else if meta.path.is_ident("skip") {
                    alias = Some("-".to_string());
                } else if meta.path.is_ident("default") {
                    let value: LitStr = meta.value()?.parse()?;
                    default_str = Some(value.value());
                } else if meta.path.is_ident("validate") {
                    let value: LitStr = meta.value()?.parse()?;
                    validate_str = Some(value.value());
                } else if meta.path.is_ident("required") {
                    required = true;
                } else if meta.path.is_ident("format") {
                    let value: LitStr = meta.value()?.parse()?;
                    format_str = Some(value.value());
                } else {
                    return Err(meta.error(
                        "unknown query attribute \
                         (expected name, skip, default, validate, required, format)",
                    ));
                }
                Ok(())
            })?;
        }

        // Ignored fields are never read, so their type needs no QueryField impl.
        if alias.as_deref() == Some("-") {
            descriptor_tokens.push(quote! {
                gauss_query::schema::FieldMeta::new(#field_name_str)
                    .alias("-")
                    .resolve(gauss_query::schema::FieldKind::Scalar(
                        gauss_query::schema::ScalarKind::String,
                    ))
            });
            init_tokens.push(quote! {
                #field_name: ::std::default::Default::default()
            });
            continue;
        }

        let key_str = alias.clone().unwrap_or_else(|| field_name_str.clone());

        let alias_call = alias.map(|a| quote! { .alias(#a) });
        let default_call = default_str.map(|d| quote! { .default_value(#d) });
        let validate_call = validate_str.map(|v| quote! { .validate(#v) });
        let required_call = required.then(|| quote! { .required() });
        let format_call = format_str.map(|f| quote! { .format(#f) });

        descriptor_tokens.push(quote! {
            gauss_query::schema::FieldMeta::new(#field_name_str)
                #alias_call
                #default_call
                #validate_call
                #required_call
                #format_call
                .resolve(<#field_ty as gauss_query::QueryField>::kind())
        });

        init_tokens.push(quote! {
            #field_name: <#field_ty as gauss_query::QueryField>::from_value(
                __record.take(#index),
                &gauss_query::value::field_key(__key, #key_str),
            )?
        });
    }

    Ok(quote! {
        impl gauss_query::QueryField for #name {
            fn kind() -> gauss_query::schema::FieldKind {
                gauss_query::schema::FieldKind::Nested(
                    <Self as gauss_query::QueryRecord>::schema,
                )
            }

            #[allow(unused_mut, unused_variables)]
            fn from_value(
                __value: gauss_query::value::Value,
                __key: &str,
            ) -> ::std::result::Result<Self, gauss_query::DecodeError> {
                let mut __record = gauss_query::value::Record::from_value(__value, __key)?;
                ::std::result::Result::Ok(Self {
                    #(#init_tokens),*
                })
            }
        }

        impl gauss_query::QueryRecord for #name {
            fn schema() -> &'static gauss_query::schema::Schema {
                static SCHEMA: ::std::sync::OnceLock<gauss_query::schema::Schema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    gauss_query::schema::Schema::new(
                        #name_str,
                        ::std::vec![
                            #(#descriptor_tokens),*
                        ],
                    )
                })
            }
        }
    })
}
