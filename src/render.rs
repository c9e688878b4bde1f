use minijinja::{value::ViaDeserialize, Environment};
use std::path::{Path, PathBuf};

use crate::utils;

pub struct Renderer {
    base_url: String,
    t: Environment<'static>,
}

impl Renderer {
    pub fn build(base_url: String, template_path: impl AsRef<Path>) -> anyhow::Result<Renderer> {
        let mut t = Environment::new();
        // Undefined template values chain and render empty; a shell may
        // reference slots for sections the data document does not carry.
        t.set_undefined_behavior(minijinja::UndefinedBehavior::Chainable);

        {
            let base_url = base_url.clone();
            t.add_filter(
                "path_to_url",
                move |path: ViaDeserialize<PathBuf>| -> Result<String, minijinja::Error> {
                    utils::path_to_url(Some(&base_url), &*path).map_err(|_| {
                        minijinja::Error::new(
                            minijinja::ErrorKind::InvalidOperation,
                            format!("path is not valid unicode: {:?}", &path.0),
                        )
                    })
                },
            );
        }

        t.set_loader(minijinja::path_loader(template_path));

        Ok(Renderer { base_url, t })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Render one page shell with the hydrated context.
    pub fn page(
        &self,
        mut write: impl std::io::Write,
        template_name: &str,
        ctx: &minijinja::Value,
    ) -> anyhow::Result<()> {
        let template = self.t.get_template(template_name)?;
        template.render_to_write(ctx, &mut write)?;

        Ok(())
    }
}
