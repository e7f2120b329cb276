//! Procedural macros for the docbridge project.
//!
//! This crate provides the `#[derive(Model)]` macro that turns a plain
//! struct into a persistable model: it builds the type's static descriptor
//! from `#[model(...)]` attributes, wires the primary-key plumbing and
//! generates the field-access table used by lookups and uniqueness checks.

#[allow(unused_extern_crates)]
extern crate self as docbridge_derive;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive macro for the `Model` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Debug, Clone, Serialize, Deserialize, Model)]
/// #[model(prod_collection = "teacher", test_collection = "test_teacher")]
/// pub struct Teacher {
///     #[model(primary_key)]
///     pub id: Option<String>,
///     pub name: String,
///     #[model(reference)]
///     pub school: ForeignKey<School>,
/// }
/// ```
///
/// Container attributes:
///
/// - `#[model(prod_collection = "...")]` names the production collection.
/// - `#[model(test_collection = "...")]` names the test collection.
/// - `#[model(document_id_with = "path::to::fn")]` derives the document
///   identifier from the instance instead of letting the store generate
///   one. The named function takes `&self` and returns `Option<String>`.
/// - `#[model(unique_together = "a, b")]` declares a uniqueness constraint
///   over the named attributes. Repeatable.
///
/// Field attributes:
///
/// - `#[model(primary_key)]` marks the identifier field, which must be an
///   `Option<String>`. Exactly one field carries it.
/// - `#[model(stored_as = "storedName")]` stores the field under a key
///   other than its attribute name.
/// - `#[model(reference)]` marks a field holding another document's
///   identifier and adds a secondary `<name>_id` accessor for it.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_model(&input) {
        Ok(expanded) => expanded.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

#[derive(Default)]
struct ContainerAttrs {
    prod_collection: Option<String>,
    test_collection: Option<String>,
    document_id_with: Option<syn::Path>,
    unique_together: Vec<Vec<String>>,
}

struct ModelField {
    ident: syn::Ident,
    ty: syn::Type,
    primary_key: bool,
    stored_as: Option<String>,
    reference: bool,
}

fn expand_model(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Model cannot be derived for generic types",
        ));
    }

    let attrs = parse_container_attrs(input)?;
    let fields = parse_fields(input)?;
    let primary_key = extract_primary_key(input, &fields)?;

    let name = &input.ident;
    let name_str = name.to_string();
    let pk_ident = &primary_key.ident;
    let pk_name = pk_ident.to_string();

    // A missing collection attribute is left out of the builder chain, so
    // the declaration fails with a configuration error at first use rather
    // than at expansion time.
    let prod_collection = match &attrs.prod_collection {
        Some(value) => quote! { .prod_collection(#value) },
        None => quote! {},
    };
    let test_collection = match &attrs.test_collection {
        Some(value) => quote! { .test_collection(#value) },
        None => quote! {},
    };

    let field_defs = fields.iter().filter(|field| !field.primary_key).map(|field| {
        let field_name = field.ident.to_string();
        let ctor = if field.reference {
            quote! { docbridge::model::FieldDef::reference(#field_name) }
        } else {
            quote! { docbridge::model::FieldDef::new(#field_name) }
        };
        let decl = match &field.stored_as {
            Some(key) => quote! { #ctor.stored_as(#key) },
            None => ctor,
        };
        quote! { .field(#decl) }
    });

    let unique_constraints = attrs.unique_together.iter().map(|constraint| {
        let parts = constraint.iter();
        quote! { .unique_together(&[#(#parts),*]) }
    });

    let accessor_entries = fields.iter().flat_map(|field| {
        let ident = &field.ident;
        let attribute = ident.to_string();
        let mut entries = vec![accessor_entry(&attribute, ident)];
        if field.reference {
            entries.push(accessor_entry(&format!("{attribute}_id"), ident));
        }
        entries
    });

    let generate_document_id = match &attrs.document_id_with {
        Some(path) => quote! {
            fn generate_document_id(&self) -> Option<String> {
                #path(self)
            }
        },
        None => quote! {},
    };

    Ok(quote! {
        impl docbridge::model::Model for #name {
            fn descriptor() -> &'static docbridge::model::ModelDescriptor {
                static DESCRIPTOR: std::sync::LazyLock<docbridge::model::ModelDescriptor> =
                    std::sync::LazyLock::new(|| {
                        docbridge::model::ModelDescriptor::builder(#name_str)
                            #prod_collection
                            #test_collection
                            .primary_key(#pk_name)
                            #(#field_defs)*
                            #(#unique_constraints)*
                            .build()
                            .unwrap_or_else(|error| panic!("{error}"))
                    });
                &DESCRIPTOR
            }

            fn document_id(&self) -> Option<&str> {
                self.#pk_ident.as_deref()
            }

            fn set_document_id(&mut self, id: String) {
                self.#pk_ident = Some(id);
            }

            fn accessors() -> &'static [docbridge::model::FieldAccessor<Self>] {
                static ACCESSORS: &[docbridge::model::FieldAccessor<#name>] =
                    &[#(#accessor_entries),*];
                ACCESSORS
            }

            #generate_document_id
        }
    })
}

fn accessor_entry(attribute: &str, ident: &syn::Ident) -> proc_macro2::TokenStream {
    quote! {
        docbridge::model::FieldAccessor {
            name: #attribute,
            get: |instance| {
                docbridge::bson::ser::serialize_to_bson(&instance.#ident)
                    .unwrap_or(docbridge::bson::Bson::Null)
            },
        }
    }
}

fn parse_container_attrs(input: &DeriveInput) -> syn::Result<ContainerAttrs> {
    let mut attrs = ContainerAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("prod_collection") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.prod_collection = Some(value.value());
            } else if meta.path.is_ident("test_collection") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.test_collection = Some(value.value());
            } else if meta.path.is_ident("document_id_with") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.document_id_with = Some(value.parse()?);
            } else if meta.path.is_ident("unique_together") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.unique_together.push(
                    value
                        .value()
                        .split(',')
                        .map(|part| part.trim().to_string())
                        .collect(),
                );
            } else {
                return Err(meta.error("unrecognized model container attribute"));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

fn parse_fields(input: &DeriveInput) -> syn::Result<Vec<ModelField>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Model can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Model requires a struct with named fields",
        ));
    };

    named
        .named
        .iter()
        .map(|field| {
            let ident = field
                .ident
                .clone()
                .expect("named fields always have identifiers");
            let mut parsed = ModelField {
                ident,
                ty: field.ty.clone(),
                primary_key: false,
                stored_as: None,
                reference: false,
            };

            for attr in &field.attrs {
                if !attr.path().is_ident("model") {
                    continue;
                }
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("primary_key") {
                        parsed.primary_key = true;
                    } else if meta.path.is_ident("reference") {
                        parsed.reference = true;
                    } else if meta.path.is_ident("stored_as") {
                        let value: LitStr = meta.value()?.parse()?;
                        parsed.stored_as = Some(value.value());
                    } else {
                        return Err(meta.error("unrecognized model field attribute"));
                    }
                    Ok(())
                })?;
            }

            Ok(parsed)
        })
        .collect()
}

fn extract_primary_key<'a>(
    input: &DeriveInput,
    fields: &'a [ModelField],
) -> syn::Result<&'a ModelField> {
    let mut marked = fields.iter().filter(|field| field.primary_key);
    let primary_key = marked.next().ok_or_else(|| {
        syn::Error::new_spanned(
            &input.ident,
            "exactly one field must carry #[model(primary_key)]",
        )
    })?;
    if marked.next().is_some() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "only one field may carry #[model(primary_key)]",
        ));
    }

    let ty = &primary_key.ty;
    if quote!(#ty).to_string() != "Option < String >" {
        return Err(syn::Error::new_spanned(
            ty,
            "the #[model(primary_key)] field must be an Option<String>",
        ));
    }

    Ok(primary_key)
}
