use proc_macro::TokenStream;
use quote::quote;
use syn::{Fields, ItemStruct, parse_macro_input};

/// Prepends the shared base columns (`id`, `created_at`, `updated_at`) to an
/// entity `Model` struct and wires the DAO base-column traits up for it.
///
/// Must be applied before `#[sea_orm::model]` so the injected fields are
/// visible to the entity derive.
#[proc_macro_attribute]
pub fn base_entity(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(item as ItemStruct);
    let fields = match &mut input.fields {
        Fields::Named(fields) => fields,
        _ => {
            return syn::Error::new_spanned(
                input,
                "base_entity requires a struct with named fields",
            )
            .to_compile_error()
            .into();
        }
    };

    let id_field: syn::Field = syn::parse_quote! {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: uuid::Uuid
    };
    let created_at_field: syn::Field = syn::parse_quote! {
        #[sea_orm(default_expr = "Expr::current_timestamp()")]
        pub created_at: sea_orm::entity::prelude::DateTimeWithTimeZone
    };
    let updated_at_field: syn::Field = syn::parse_quote! {
        #[sea_orm(default_expr = "Expr::current_timestamp()")]
        pub updated_at: sea_orm::entity::prelude::DateTimeWithTimeZone
    };

    let mut base = syn::punctuated::Punctuated::new();
    base.push(id_field);
    base.push(created_at_field);
    base.push(updated_at_field);
    for field in fields.named.iter().cloned() {
        base.push(field);
    }
    fields.named = base;

    let expanded = quote! {
        #input

        impl crate::db::dao::base_traits::BaseColumnsActiveModel for ActiveModel {
            fn set_id(&mut self, id: uuid::Uuid) {
                self.id = sea_orm::ActiveValue::Set(id);
            }

            fn set_created_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone) {
                self.created_at = sea_orm::ActiveValue::Set(ts);
            }

            fn set_updated_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone) {
                self.updated_at = sea_orm::ActiveValue::Set(ts);
            }
        }

        impl crate::db::dao::base_traits::HasCreatedAtColumn for Entity {
            fn created_at_column() -> Column {
                Column::CreatedAt
            }
        }
    };

    expanded.into()
}
