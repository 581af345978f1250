use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use syn::spanned::Spanned as _;
use syn::{
    Attribute, Data, DeriveInput, Error, Fields, GenericArgument, LitStr, PathArguments, Type,
};

const COMPONENT_ATTR: &str = "component";
const INJECT_ATTR: &str = "inject";

fn extract_option_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner);
    }
    None
}

fn extract_arc_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Arc"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner);
    }
    None
}

fn is_bean_ref(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
    {
        return segment.ident == "BeanRef";
    }
    false
}

fn has_inject_attr(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(INJECT_ATTR))
}

#[derive(Default)]
struct ComponentAttr {
    name: Option<LitStr>,
    scope: Option<LitStr>,
    aware: bool,
    init: bool,
    post_processor: bool,
}

fn parse_component_attr(attrs: &[Attribute]) -> Result<ComponentAttr, Error> {
    let mut parsed = ComponentAttr::default();
    for attr in attrs {
        if !attr.path().is_ident(COMPONENT_ATTR) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                parsed.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("scope") {
                parsed.scope = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("aware") {
                parsed.aware = true;
            } else if meta.path.is_ident("init") {
                parsed.init = true;
            } else if meta.path.is_ident("post_processor") {
                parsed.post_processor = true;
            } else {
                return Err(meta.error(
                    "Expected name, scope, aware, init or post_processor",
                ));
            }
            Ok(())
        })?;
    }
    Ok(parsed)
}

/// Derive macro for the Component trait
#[proc_macro_derive(Component, attributes(component, inject))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    handle_derive_component(input)
}

fn handle_derive_component(input: DeriveInput) -> TokenStream {
    let ident = &input.ident;
    let ident_str = ident.to_string();

    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        _ => {
            return TokenStream::from(
                Error::new(ident.span(), "Only structs are supported").to_compile_error(),
            );
        }
    };

    let attr = match parse_component_attr(&input.attrs) {
        Ok(attr) => attr,
        Err(err) => return TokenStream::from(err.to_compile_error()),
    };

    let mut descriptor = quote! {
        ::sprout::TypeDescriptor::new(
            ::std::module_path!(),
            #ident_str,
            || {
                let bean: ::std::boxed::Box<dyn ::sprout::Bean> =
                    ::std::boxed::Box::new(<#ident as ::std::default::Default>::default());
                ::std::result::Result::Ok(bean)
            },
        )
    };

    if let Some(name) = &attr.name {
        descriptor = quote! { #descriptor.named(#name) };
    }

    if let Some(scope) = &attr.scope {
        let value = match scope.value().as_str() {
            "singleton" => quote! { ::sprout::Scope::Singleton },
            "prototype" => quote! { ::sprout::Scope::Prototype },
            _ => {
                return TokenStream::from(
                    Error::new(scope.span(), "Scope must be \"singleton\" or \"prototype\"")
                        .to_compile_error(),
                );
            }
        };
        descriptor = quote! { #descriptor.scoped(#value) };
    }

    match fields {
        Fields::Named(fields) => {
            for field in &fields.named {
                if !has_inject_attr(&field.attrs) {
                    continue;
                }
                let field_ident = field.ident.as_ref().unwrap();
                let field_name = field_ident.to_string();
                let Some(inner) = extract_option_type(&field.ty) else {
                    return inject_type_error(&field.ty);
                };
                if is_bean_ref(inner) {
                    descriptor = quote! {
                        #descriptor.with_field(#field_name, |bean, value| {
                            let ::std::option::Option::Some(this) =
                                bean.downcast_mut::<#ident>()
                            else {
                                return ::std::result::Result::Err(
                                    ::sprout::BeanError::TypeMismatch {
                                        name: #field_name.to_string(),
                                        expected: ::std::any::type_name::<#ident>(),
                                    },
                                );
                            };
                            this.#field_ident = ::std::option::Option::Some(value);
                            ::std::result::Result::Ok(())
                        })
                    };
                } else if let Some(dependency) = extract_arc_type(inner) {
                    descriptor = quote! {
                        #descriptor.with_field(#field_name, |bean, value| {
                            let ::std::option::Option::Some(this) =
                                bean.downcast_mut::<#ident>()
                            else {
                                return ::std::result::Result::Err(
                                    ::sprout::BeanError::TypeMismatch {
                                        name: #field_name.to_string(),
                                        expected: ::std::any::type_name::<#ident>(),
                                    },
                                );
                            };
                            match ::sprout::downcast_arc::<#dependency>(&value) {
                                ::std::option::Option::Some(dependency) => {
                                    this.#field_ident = ::std::option::Option::Some(dependency);
                                    ::std::result::Result::Ok(())
                                }
                                ::std::option::Option::None => ::std::result::Result::Err(
                                    ::sprout::BeanError::TypeMismatch {
                                        name: #field_name.to_string(),
                                        expected: ::std::any::type_name::<#dependency>(),
                                    },
                                ),
                            }
                        })
                    };
                } else {
                    return inject_type_error(&field.ty);
                }
            }
        }
        Fields::Unnamed(_) => {
            return TokenStream::from(
                Error::new(ident.span(), "Tuple structs are not supported").to_compile_error(),
            );
        }
        Fields::Unit => {}
    }

    if attr.post_processor {
        descriptor = quote! {
            #descriptor.with_post_processor(|| {
                let processor: ::std::boxed::Box<dyn ::sprout::PostProcessor> =
                    ::std::boxed::Box::new(<#ident as ::std::default::Default>::default());
                ::std::result::Result::Ok(processor)
            })
        };
    }

    let aware_impl: Option<TokenStream2> = attr.aware.then(|| {
        quote! {
            fn as_name_aware(&mut self) -> ::std::option::Option<&mut dyn ::sprout::NameAware> {
                ::std::option::Option::Some(self)
            }
        }
    });

    let init_impl: Option<TokenStream2> = attr.init.then(|| {
        quote! {
            fn as_initialize(&mut self) -> ::std::option::Option<&mut dyn ::sprout::Initialize> {
                ::std::option::Option::Some(self)
            }
        }
    });

    quote! {
        impl ::sprout::Bean for #ident {
            #aware_impl
            #init_impl
        }

        impl ::sprout::Component for #ident {
            fn descriptor() -> ::sprout::TypeDescriptor {
                #descriptor
            }
        }
    }
    .into()
}

fn inject_type_error(ty: &Type) -> TokenStream {
    TokenStream::from(
        Error::new(
            ty.span(),
            "Injected fields must be of type Option<Arc<T>> or Option<BeanRef>",
        )
        .to_compile_error(),
    )
}
