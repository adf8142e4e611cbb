use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{
    parse_quote, Attribute, Data, DataEnum, DataStruct, DeriveInput, Fields, Generics, Ident,
    Index, Member, Type,
};

/// Largest multi-field alternative that can be projected as a tuple record.
const MAX_ALTERNATIVE_FIELDS: usize = 8;

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let transparent = parse_transparent(&input.attrs)?;
    match &input.data {
        Data::Struct(data) => expand_struct(&input, data, transparent),
        Data::Enum(data) => {
            if transparent {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "`#[projection(transparent)]` only applies to structs",
                ));
            }
            if data.variants.iter().all(|v| matches!(v.fields, Fields::Unit)) {
                expand_enumeration(&input, data)
            } else {
                expand_variant(&input, data)
            }
        }
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "unions have no structural shape; `Project` cannot be derived",
        )),
    }
}

fn parse_transparent(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut transparent = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("projection")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("transparent") {
                transparent = true;
                Ok(())
            } else {
                Err(meta.error("unsupported projection attribute"))
            }
        })?;
    }
    Ok(transparent)
}

fn with_project_bounds(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::portvalue_core::Project));
    }
    generics
}

struct FieldInfo {
    member: Member,
    name: String,
    ty: Type,
}

fn field_infos(fields: &Fields) -> Vec<FieldInfo> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| match &field.ident {
            Some(ident) => FieldInfo {
                member: Member::Named(ident.clone()),
                name: ident.to_string(),
                ty: field.ty.clone(),
            },
            None => FieldInfo {
                member: Member::Unnamed(Index::from(index)),
                name: index.to_string(),
                ty: field.ty.clone(),
            },
        })
        .collect()
}

fn expand_struct(
    input: &DeriveInput,
    data: &DataStruct,
    transparent: bool,
) -> syn::Result<TokenStream> {
    let fields = field_infos(&data.fields);
    let single_unnamed = matches!(data.fields, Fields::Unnamed(_)) && fields.len() == 1;

    if transparent && fields.len() != 1 {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "`#[projection(transparent)]` requires exactly one field",
        ));
    }

    if transparent || single_unnamed {
        expand_wrapper(input, &fields[0])
    } else {
        expand_record(input, &fields)
    }
}

fn expand_wrapper(input: &DeriveInput, field: &FieldInfo) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let generics = with_project_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let FieldInfo { member, ty, .. } = field;

    Ok(quote! {
        impl #impl_generics ::portvalue_core::shape::Wrapper for #ident #ty_generics #where_clause {
            type Inner = #ty;

            fn inner(&self) -> &Self::Inner {
                &self.#member
            }
        }

        impl #impl_generics ::portvalue_core::Project for #ident #ty_generics #where_clause {
            const SHAPE: ::portvalue_core::Shape = ::portvalue_core::Shape::Wrapper;

            fn project_into(&self, dst: &mut ::portvalue_core::Value) {
                ::portvalue_core::project::project_wrapper(self, dst)
            }
        }
    })
}

fn expand_record(input: &DeriveInput, fields: &[FieldInfo]) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let generics = with_project_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let count = fields.len();
    let names: Vec<&String> = fields.iter().map(|f| &f.name).collect();
    let members = fields
        .iter()
        .filter(|f| matches!(f.member, Member::Named(_)))
        .map(|f| &f.name);
    let shapes: Vec<TokenStream> = fields
        .iter()
        .map(|f| {
            let ty = &f.ty;
            quote!(<#ty as ::portvalue_core::Project>::SHAPE)
        })
        .collect();
    let visits = fields.iter().enumerate().map(|(index, f)| {
        let member = &f.member;
        let name = &f.name;
        quote!(_visitor.visit_field(#index, #name, &self.#member);)
    });

    Ok(quote! {
        impl #impl_generics ::portvalue_core::shape::Record for #ident #ty_generics #where_clause {
            const FIELD_COUNT: usize = #count;
            const FIELD_NAMES: &'static [&'static str] = &[#(#names),*];
            const VECTOR_COMPATIBLE: bool =
                ::portvalue_core::shape::vector_compatible(&[#(#shapes),*]);

            fn visit_fields<__V: ::portvalue_core::shape::FieldVisitor>(&self, _visitor: &mut __V) {
                #(#visits)*
            }
        }

        impl #impl_generics ::portvalue_core::Project for #ident #ty_generics #where_clause {
            const SHAPE: ::portvalue_core::Shape =
                ::portvalue_core::shape::record_shape(&[#(#shapes),*]);
            const MEMBERS: &'static [&'static str] = &[#(#members),*];

            fn project_into(&self, dst: &mut ::portvalue_core::Value) {
                ::portvalue_core::project::project_record(self, dst)
            }
        }
    })
}

fn expand_enumeration(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let variants: Vec<&Ident> = data.variants.iter().map(|v| &v.ident).collect();
    let names: Vec<String> = variants.iter().map(|v| v.to_string()).collect();

    let (ordinal_body, name_body) = if variants.is_empty() {
        (quote!(match *self {}), quote!(match *self {}))
    } else {
        (
            quote! {
                match self {
                    #(Self::#variants => Self::#variants as i32,)*
                }
            },
            quote! {
                match self {
                    #(Self::#variants => #names,)*
                }
            },
        )
    };

    Ok(quote! {
        impl #impl_generics ::portvalue_core::shape::EnumLike for #ident #ty_generics #where_clause {
            const NAMES: &'static [&'static str] = &[#(#names),*];

            fn ordinal(&self) -> i32 {
                #ordinal_body
            }

            fn name(&self) -> &'static str {
                #name_body
            }
        }

        impl #impl_generics ::portvalue_core::Project for #ident #ty_generics #where_clause {
            const SHAPE: ::portvalue_core::Shape = ::portvalue_core::Shape::Enum;

            fn project_into(&self, dst: &mut ::portvalue_core::Value) {
                ::portvalue_core::project::project_enum(self, dst)
            }
        }
    })
}

fn expand_variant(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let generics = with_project_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let count = data.variants.len();
    let mut index_arms = Vec::with_capacity(count);
    let mut visit_arms = Vec::with_capacity(count);

    for (index, variant) in data.variants.iter().enumerate() {
        let name = &variant.ident;
        index_arms.push(quote!(Self::#name { .. } => #index,));

        let bindings: Vec<Ident> = (0..variant.fields.len())
            .map(|i| format_ident!("__f{}", i, span = Span::call_site()))
            .collect();
        if bindings.len() > MAX_ALTERNATIVE_FIELDS {
            return Err(syn::Error::new_spanned(
                variant,
                format!("alternatives with more than {MAX_ALTERNATIVE_FIELDS} fields cannot be projected"),
            ));
        }

        let pattern = match &variant.fields {
            Fields::Unit => quote!(Self::#name),
            Fields::Unnamed(_) => quote!(Self::#name(#(#bindings),*)),
            Fields::Named(named) => {
                let members = named.named.iter().filter_map(|f| f.ident.as_ref());
                quote!(Self::#name { #(#members: #bindings),* })
            }
        };
        let visit = match bindings.as_slice() {
            [] => quote!(visitor.visit(&())),
            [single] => quote!(visitor.visit(#single)),
            many => quote!(visitor.visit(&(#(#many,)*))),
        };
        visit_arms.push(quote!(#pattern => #visit,));
    }

    Ok(quote! {
        impl #impl_generics ::portvalue_core::shape::VariantLike for #ident #ty_generics #where_clause {
            const ALTERNATIVES: usize = #count;

            fn active_index(&self) -> usize {
                match self {
                    #(#index_arms)*
                }
            }

            fn visit_active<__V: ::portvalue_core::shape::AlternativeVisitor>(
                &self,
                visitor: __V,
            ) -> __V::Output {
                match self {
                    #(#visit_arms)*
                }
            }
        }

        impl #impl_generics ::portvalue_core::Project for #ident #ty_generics #where_clause {
            const SHAPE: ::portvalue_core::Shape = ::portvalue_core::Shape::Variant;

            fn project_into(&self, dst: &mut ::portvalue_core::Value) {
                ::portvalue_core::project::project_variant(self, dst)
            }
        }
    })
}
