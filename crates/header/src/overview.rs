//! The human-readable comment at the top of the header, listing what the header declares and how to use it.

use crate::buffer::{emit, HeaderBuffer};
use crate::descriptor::image_type_name;
use crate::validate::ValidatedDialect;
use shdc_reflection::{ShaderInput, ShaderReflection, Stage};

pub fn write_overview(out: &mut HeaderBuffer, input: &ShaderInput, gen_version: u32, validated: &ValidatedDialect<'_>) {
	let prefix = input.prefix();
	out.push_str("/*\n");
	emit!(out, "    #version:{}# (machine generated, don't edit!)\n\n", gen_version);
	out.push_str("    Generated by sokol-shdc (https://github.com/floooh/sokol-tools)\n\n");
	out.push_str("    Overview:\n\n");
	for stages in &validated.programs {
		let program = stages.program;
		emit!(out, "        Shader program '{}':\n", program.name);
		emit!(out, "            Get shader desc: {}{}_shader_desc()\n", prefix, program.name);
		emit!(out, "            Vertex shader: {}\n", program.vs_name);
		out.push_str("                Attribute slots:\n");
		for attr in stages.vs.source.refl.used_inputs() {
			if let Some(slot) = attr.slot {
				emit!(
					out,
					"                    ATTR_{}{}_{} = {}\n",
					prefix,
					stages.vs.snippet.name,
					attr.name,
					slot
				);
			}
		}
		write_stage_resources(out, &prefix, &stages.vs.source.refl);
		emit!(out, "            Fragment shader: {}\n", program.fs_name);
		write_stage_resources(out, &prefix, &stages.fs.source.refl);
		out.push_str("\n");
	}
	out.push_str("\n");
	out.push_str("    Shader descriptor structs:\n\n");
	for stages in &validated.programs {
		let name = &stages.program.name;
		emit!(out, "        sg_shader {} = sg_make_shader({}{}_shader_desc());\n", name, prefix, name);
	}
	out.push_str("\n");
	for src in &validated.index.output.sources {
		if src.refl.stage != Stage::Vertex {
			continue;
		}
		let Some(snippet) = input.snippets.get(src.snippet_index) else {
			continue;
		};
		emit!(out, "    Vertex attribute locations for vertex shader '{}':\n\n", snippet.name);
		out.push_str("        sg_pipeline pip = sg_make_pipeline(&(sg_pipeline_desc){\n");
		out.push_str("            .layout = {\n");
		out.push_str("                .attrs = {\n");
		for attr in src.refl.used_inputs() {
			emit!(out, "                    [ATTR_{}{}_{}] = {{ ... }},\n", prefix, snippet.name, attr.name);
		}
		out.push_str("                },\n");
		out.push_str("            },\n");
		out.push_str("            ...});\n");
		out.push_str("\n");
	}
	out.push_str("    Image bind slots, use as index in sg_bindings.vs_images[] or .fs_images[]\n\n");
	for img in &validated.unique.images {
		emit!(out, "        SLOT_{}{} = {};\n", prefix, img.name, img.slot);
	}
	out.push_str("\n");
	for ub in &validated.unique.uniform_blocks {
		emit!(out, "    Bind slot and C-struct for uniform block '{}':\n\n", ub.name);
		emit!(out, "        {}{}_t {} = {{\n", prefix, ub.name, ub.name);
		for uniform in &ub.uniforms {
			emit!(out, "            .{} = ...;\n", uniform.name);
		}
		out.push_str("        };\n");
		emit!(
			out,
			"        sg_apply_uniforms(SG_SHADERSTAGE_[VS|FS], SLOT_{}{}, &{}, sizeof({}));\n",
			prefix,
			ub.name,
			ub.name,
			ub.name
		);
		out.push_str("\n");
	}
	out.push_str("*/\n");
	out.push_str("#include <stdint.h>\n");
	out.push_str("#include <stdbool.h>\n");
}

fn write_stage_resources(out: &mut HeaderBuffer, prefix: &str, refl: &ShaderReflection) {
	for ub in &refl.uniform_blocks {
		emit!(out, "                Uniform block '{}':\n", ub.name);
		emit!(out, "                    C struct: {}{}_t\n", prefix, ub.name);
		emit!(out, "                    Bind slot: SLOT_{}{} = {}\n", prefix, ub.name, ub.slot);
	}
	for img in &refl.images {
		emit!(out, "                Image '{}':\n", img.name);
		emit!(out, "                    Type: {}\n", image_type_name(img.ty));
		emit!(out, "                    Bind slot: SLOT_{}{} = {}\n", prefix, img.name, img.slot);
	}
}
